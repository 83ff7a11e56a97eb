// crypto/key.rs - The caller-supplied symmetric key
//
// A thin wrapper that zeroizes its contents on drop and never implements
// `Debug`/`Display` in a way that could leak the bytes. No password-based
// key derivation lives here; `Key` only ever wraps a raw 32-byte value
// handed in by the caller, and rejects any other length before any I/O
// happens.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{EngineError, EngineResult};

/// An opaque 32-byte symmetric key, borrowed for the duration of one call.
///
/// The key is zeroized from memory when dropped. It is never logged, never
/// retained past the call that constructed it, and never mutated.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Key([u8; 32]);

impl Key {
    /// Construct a `Key` from a byte slice.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidKeyLength` if `bytes` is not exactly 32
    /// bytes long. This check happens before any file is opened.
    pub fn from_slice(bytes: &[u8]) -> EngineResult<Self> {
        if bytes.len() != 32 {
            return Err(EngineError::InvalidKeyLength(bytes.len()));
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key([REDACTED 32 bytes])")
    }
}
