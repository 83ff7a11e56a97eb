// error.rs - Error taxonomy for the streaming file encryption engine
//
// A thiserror enum with one variant per failure kind and `#[from]
// std::io::Error` for IoError, with no internal recovery. Nothing here
// implements serde::Serialize; this is a plain library error type with no
// IPC boundary to cross.

use thiserror::Error;

/// Error kinds surfaced by the encryption engine.
///
/// Every operation either succeeds or aborts with one of these; partial
/// output is cleaned up best-effort (see `io::OutputGuard`) before the error
/// reaches the caller.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Key is not exactly 32 bytes.
    #[error("key must be exactly 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// Algorithm string or header wire code is not recognized.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Any filesystem operation failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Container header magic did not match.
    #[error("not a streaming container (bad magic)")]
    NotAContainer,

    /// Container header version is not recognized.
    #[error("unsupported container version: {0}")]
    UnsupportedVersion(u16),

    /// Container header reserved/flags bits were nonzero.
    #[error("unsupported container flags: {0:#x}")]
    UnsupportedFlags(u32),

    /// Header algorithm id does not match the algorithm requested by the caller.
    #[error("algorithm mismatch: header says {header}, caller requested {requested}")]
    AlgorithmMismatch { header: String, requested: String },

    /// End of file reached partway through a frame's payload.
    #[error("truncated frame: expected {expected} bytes, stream ended")]
    TruncatedFrame { expected: u32 },

    /// A frame (configured or decoded) exceeds the 4 GiB length-prefix limit.
    #[error("frame too large: {0} bytes exceeds the 4 GiB frame limit")]
    FrameTooLarge(u64),

    /// AEAD authentication tag verification failed.
    #[error("authentication failed: wrong key or tampered data")]
    AuthFailure,

    /// PKCS#7 padding was invalid on CBC decrypt.
    #[error("invalid PKCS#7 padding")]
    PaddingError,

    /// Underlying cryptographic primitive failed outside the above cases.
    #[error("cryptographic primitive error: {0}")]
    CryptoError(String),
}

/// Result type alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message() {
        let error = EngineError::UnknownAlgorithm("rot13".to_string());
        assert_eq!(error.to_string(), "unknown algorithm: rot13");
    }

    #[test]
    fn test_algorithm_mismatch_message() {
        let error = EngineError::AlgorithmMismatch {
            header: "aes".to_string(),
            requested: "chacha20poly1305".to_string(),
        };
        assert!(error.to_string().contains("header says aes"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let engine_err: EngineError = io_err.into();
        assert!(matches!(engine_err, EngineError::IoError(_)));
    }
}
