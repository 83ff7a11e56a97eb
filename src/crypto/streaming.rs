// crypto/streaming.rs - Chunked streaming encryptor/decryptor
//
// Read plaintext in bounded chunks, seal each one independently, frame it,
// and write it out, one chunk resident at a time regardless of file size.
// A single reusable plaintext buffer and the read-seal-write-per-chunk loop
// keep memory use flat. The fixed 24-byte container header carries no KDF
// parameters, since this engine takes a raw key rather than a password.
// The AEAD variant seals with no associated data binding the header or
// frame index (a known limitation: no overall file authentication, not an
// oversight). Empty input produces zero frames rather than one
// empty-but-authenticated frame.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::crypto::algorithm::{self, AlgorithmId};
use crate::crypto::container::ContainerHeader;
use crate::crypto::frame;
use crate::crypto::key::Key;
use crate::error::{EngineError, EngineResult};
use crate::io_guard::OutputGuard;

/// One MiB, the unit `chunk_size_mib` is expressed in.
const MIB: u64 = 1024 * 1024;

/// Progress callback for streaming operations: `(bytes_processed, total_bytes)`.
pub type ProgressCallback<'a> = Box<dyn Fn(u64, u64) + Send + Sync + 'a>;

/// Result of a streaming encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamEncryptStats {
    pub file_size: u64,
    pub chunk_size: u64,
    pub total_chunks: u64,
}

/// Result of a streaming decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDecryptStats {
    pub original_size: u64,
    pub total_bytes: u64,
    pub chunk_size: u64,
    pub total_chunks: u64,
}

/// Encrypt `input_path` into the streaming container format at `output_path`.
///
/// `chunk_size_mib` must be at least 1. The configured chunk size is
/// rejected with `FrameTooLarge` before any I/O if a full chunk sealed under
/// `algo` could not fit the frame codec's 4-byte length prefix.
pub fn encrypt_streaming(
    algo: AlgorithmId,
    key: &Key,
    input_path: &Path,
    output_path: &Path,
    chunk_size_mib: u32,
    progress: Option<ProgressCallback<'_>>,
) -> EngineResult<StreamEncryptStats> {
    if chunk_size_mib == 0 {
        return Err(EngineError::CryptoError(
            "chunk size must be at least 1 MiB".to_string(),
        ));
    }
    let chunk_size = chunk_size_mib as u64 * MIB;
    validate_frame_budget(algo, chunk_size)?;

    let input_file = File::open(input_path)?;
    let file_size = input_file.metadata()?.len();
    let mut reader = BufReader::new(input_file);

    let mut guard = OutputGuard::create(output_path)?;
    let mut writer = BufWriter::new(guard.file_mut());

    ContainerHeader::new(algo, chunk_size).write_to(&mut writer)?;

    let mut buffer = vec![0u8; chunk_size as usize];
    let mut bytes_processed: u64 = 0;
    let mut total_chunks: u64 = 0;

    loop {
        let bytes_read = read_chunk(&mut reader, &mut buffer)?;
        if bytes_read == 0 {
            break;
        }

        let sealed = algorithm::seal(algo, key, &buffer[..bytes_read])?;
        frame::encode(&mut writer, &sealed)?;

        total_chunks += 1;
        bytes_processed += bytes_read as u64;
        if let Some(ref callback) = progress {
            callback(bytes_processed, file_size);
        }

        if (bytes_read as u64) < chunk_size {
            break; // short read: this was the last chunk
        }
    }

    writer.flush()?;
    drop(writer);
    guard.finish()?;

    Ok(StreamEncryptStats {
        file_size,
        chunk_size,
        total_chunks,
    })
}

/// Decrypt a streaming container at `input_path` into plaintext at `output_path`.
///
/// `algo` is cross-checked against the header's algorithm id; a mismatch
/// aborts with `EngineError::AlgorithmMismatch` before any frame is opened.
pub fn decrypt_streaming(
    algo: AlgorithmId,
    key: &Key,
    input_path: &Path,
    output_path: &Path,
    progress: Option<ProgressCallback<'_>>,
) -> EngineResult<StreamDecryptStats> {
    let input_file = File::open(input_path)?;
    let file_size = input_file.metadata()?.len();
    let mut reader = BufReader::new(input_file);

    let header = ContainerHeader::read_from(&mut reader)?;
    if header.algorithm != algo {
        return Err(EngineError::AlgorithmMismatch {
            header: header.algorithm.as_str().to_string(),
            requested: algo.as_str().to_string(),
        });
    }

    let mut guard = OutputGuard::create(output_path)?;
    let mut writer = BufWriter::new(guard.file_mut());

    let mut total_bytes: u64 = 0;
    let mut total_chunks: u64 = 0;

    while let Some(sealed) = frame::decode(&mut reader)? {
        let plaintext = algorithm::open(algo, key, &sealed)?;
        writer.write_all(&plaintext)?;

        total_bytes += plaintext.len() as u64;
        total_chunks += 1;
        if let Some(ref callback) = progress {
            callback(total_bytes, file_size);
        }
    }

    writer.flush()?;
    drop(writer);
    guard.finish()?;

    Ok(StreamDecryptStats {
        original_size: total_bytes,
        total_bytes,
        chunk_size: header.chunk_size,
        total_chunks,
    })
}

/// Reject chunk sizes whose sealed frame could not fit the frame codec's
/// 4-byte length prefix, before any file is opened.
fn validate_frame_budget(algo: AlgorithmId, chunk_size: u64) -> EngineResult<()> {
    let worst_case = chunk_size + algo.max_overhead_bytes() as u64;
    if worst_case > frame::MAX_FRAME_LEN {
        return Err(EngineError::FrameTooLarge(worst_case));
    }
    Ok(())
}

/// Fill `buffer` as much as possible from `reader`, returning the number of
/// bytes filled (0 only at true end-of-stream). Unlike `read_exact`, a short
/// final chunk is not an error.
fn read_chunk<R: Read>(reader: &mut R, buffer: &mut [u8]) -> EngineResult<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(EngineError::IoError(e)),
        }
    }
    Ok(filled)
}
