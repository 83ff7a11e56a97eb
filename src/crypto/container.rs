// crypto/container.rs - 24-byte streaming container preamble
//
// Explicit-offset header read/write: an 8-byte magic, 2-byte version,
// 2-byte algorithm id, 4-byte reserved flags, and 8-byte chunk size, all
// little-endian. No KDF parameters here, since this engine takes a raw key
// rather than deriving one from a password.

use std::io::{Read, Write};

use crate::crypto::algorithm::AlgorithmId;
use crate::error::{EngineError, EngineResult};

/// Fixed container preamble, written once before the first frame.
pub const MAGIC: &[u8; 8] = b"ENCFILE1";

/// Current container format version.
pub const VERSION: u16 = 1;

/// Total size of the container header in bytes.
pub const HEADER_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u16,
    pub algorithm: AlgorithmId,
    pub chunk_size: u64,
}

impl ContainerHeader {
    pub fn new(algorithm: AlgorithmId, chunk_size: u64) -> Self {
        Self {
            version: VERSION,
            algorithm,
            chunk_size,
        }
    }

    /// Write the 24-byte header: `magic(8) | version(2) | algo(2) | flags(4) | chunk_size(8)`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> EngineResult<()> {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..8].copy_from_slice(MAGIC);
        buf[8..10].copy_from_slice(&self.version.to_le_bytes());
        buf[10..12].copy_from_slice(&self.algorithm.to_wire_code().to_le_bytes());
        // bytes 12..16 are reserved flags, always zero.
        buf[16..24].copy_from_slice(&self.chunk_size.to_le_bytes());
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Parse and validate a 24-byte header.
    ///
    /// Validates magic (`NotAContainer`), version (`UnsupportedVersion`),
    /// and flags (`UnsupportedFlags`). The algorithm id is parsed but not
    /// cross-checked here; that is the caller's job (`AlgorithmMismatch`),
    /// since this type doesn't know what algorithm the caller requested.
    pub fn read_from<R: Read>(reader: &mut R) -> EngineResult<Self> {
        let mut buf = [0u8; HEADER_LEN];
        reader.read_exact(&mut buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                EngineError::NotAContainer
            } else {
                EngineError::IoError(e)
            }
        })?;

        if &buf[0..8] != MAGIC {
            return Err(EngineError::NotAContainer);
        }

        let version = u16::from_le_bytes(buf[8..10].try_into().unwrap());
        if version != VERSION {
            return Err(EngineError::UnsupportedVersion(version));
        }

        let algo_code = u16::from_le_bytes(buf[10..12].try_into().unwrap());
        let algorithm = AlgorithmId::from_wire_code(algo_code)
            .map_err(|_| EngineError::UnknownAlgorithm(format!("wire code {algo_code}")))?;

        let flags = u32::from_le_bytes(buf[12..16].try_into().unwrap());
        if flags != 0 {
            return Err(EngineError::UnsupportedFlags(flags));
        }

        let chunk_size = u64::from_le_bytes(buf[16..24].try_into().unwrap());

        Ok(Self {
            version,
            algorithm,
            chunk_size,
        })
    }
}
