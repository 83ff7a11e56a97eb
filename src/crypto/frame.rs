// crypto/frame.rs - Length-prefixed frame codec
//
// A frame on disk is `len(4, little-endian) || sealed_bytes(len)`. Pulled
// out into its own codec so the streaming encryptor/decryptor and any future
// random-access reader share one encode/decode pair instead of re-deriving
// the layout.

use std::io::{ErrorKind, Read, Write};

use crate::error::{EngineError, EngineResult};

/// Frames are capped by the 4-byte little-endian length prefix.
pub const MAX_FRAME_LEN: u64 = u32::MAX as u64;

/// Write one frame: `len(4 LE) || sealed`.
pub fn encode<W: Write>(writer: &mut W, sealed: &[u8]) -> EngineResult<()> {
    let len = u32::try_from(sealed.len())
        .map_err(|_| EngineError::FrameTooLarge(sealed.len() as u64))?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(sealed)?;
    Ok(())
}

/// Read one frame.
///
/// Returns `Ok(None)` if the stream ended cleanly at the length prefix
/// (end-of-stream). Returns `EngineError::TruncatedFrame` if EOF is hit
/// partway through the length prefix or the payload.
pub fn decode<R: Read>(reader: &mut R) -> EngineResult<Option<Vec<u8>>> {
    let mut len_bytes = [0u8; 4];
    match read_exact_or_eof(reader, &mut len_bytes)? {
        ReadOutcome::CleanEof => return Ok(None),
        ReadOutcome::Partial => {
            return Err(EngineError::TruncatedFrame { expected: 4 });
        }
        ReadOutcome::Full => {}
    }

    let len = u32::from_le_bytes(len_bytes);
    let mut payload = vec![0u8; len as usize];
    reader
        .read_exact(&mut payload)
        .map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => EngineError::TruncatedFrame { expected: len },
            _ => EngineError::IoError(e),
        })?;
    Ok(Some(payload))
}

enum ReadOutcome {
    Full,
    /// Nothing at all was read (the clean end-of-stream case).
    CleanEof,
    /// Some bytes were read before EOF hit (a truncated prefix).
    Partial,
}

fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> EngineResult<ReadOutcome> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Ok(if filled == 0 {
                    ReadOutcome::CleanEof
                } else {
                    ReadOutcome::Partial
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(EngineError::IoError(e)),
        }
    }
    Ok(ReadOutcome::Full)
}
