// ops.rs - Public operations surface
//
// Logs the operation start at `info` level (never logging the key),
// delegates to the mechanism layer in `crypto::*`, and shapes the result
// record. No event emission of any kind lives here; the streaming operations
// just accept an optional runtime-agnostic `ProgressCallback` closure.

use std::path::Path;

use serde::Serialize;

use crate::crypto::algorithm::AlgorithmId;
use crate::crypto::key::Key;
use crate::crypto::streaming::{self, ProgressCallback};
use crate::crypto::whole_file;
use crate::error::EngineResult;
use crate::fileutil;

fn to_kb(bytes: u64) -> u64 {
    bytes / 1024
}

/// Result of `encrypt_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncryptResult {
    pub file_size_kb: u64,
}

/// Result of `decrypt_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecryptResult {
    pub file_size_kb: u64,
    pub encrypted_size_kb: u64,
}

/// Result of `chunk_encrypt_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkEncryptResult {
    pub file_size_kb: u64,
    pub chunk_size: u64,
    pub total_chunks: u64,
}

/// Result of `chunk_decrypt_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkDecryptResult {
    pub original_size_kb: u64,
    pub total_bytes_kb: u64,
    pub chunk_size: u64,
    pub total_chunks: u64,
}

/// Whole-file encrypt: reads the entire input, seals it once, writes it
/// directly with no container header.
pub fn encrypt_file(
    algo: AlgorithmId,
    key: &Key,
    input_path: &Path,
    output_path: &Path,
) -> EngineResult<EncryptResult> {
    log::info!("encrypting {} (whole-file, {})", input_path.display(), algo.as_str());
    let sealed_size = whole_file::encrypt_file(algo, key, input_path, output_path)?;
    Ok(EncryptResult {
        file_size_kb: to_kb(sealed_size),
    })
}

/// Whole-file decrypt: reads the entire ciphertext, opens it once.
pub fn decrypt_file(
    algo: AlgorithmId,
    key: &Key,
    input_path: &Path,
    output_path: &Path,
) -> EngineResult<DecryptResult> {
    log::info!("decrypting {} (whole-file, {})", input_path.display(), algo.as_str());
    let (plaintext_size, encrypted_size) =
        whole_file::decrypt_file(algo, key, input_path, output_path)?;
    Ok(DecryptResult {
        file_size_kb: to_kb(plaintext_size),
        encrypted_size_kb: to_kb(encrypted_size),
    })
}

/// Chunked streaming encrypt: writes the 24-byte container header followed
/// by length-prefixed sealed frames, bounded to one chunk resident in
/// memory at a time.
pub fn chunk_encrypt_file(
    algo: AlgorithmId,
    key: &Key,
    input_path: &Path,
    output_path: &Path,
    chunk_size_mib: u32,
    progress: Option<ProgressCallback<'_>>,
) -> EngineResult<ChunkEncryptResult> {
    log::info!(
        "encrypting {} (streaming, {}, {} MiB chunks)",
        input_path.display(),
        algo.as_str(),
        chunk_size_mib
    );
    let stats =
        streaming::encrypt_streaming(algo, key, input_path, output_path, chunk_size_mib, progress)?;
    Ok(ChunkEncryptResult {
        file_size_kb: to_kb(stats.file_size),
        chunk_size: stats.chunk_size,
        total_chunks: stats.total_chunks,
    })
}

/// Chunked streaming decrypt: validates the container header against
/// `algo`, then decodes and opens frames until clean end-of-stream.
pub fn chunk_decrypt_file(
    algo: AlgorithmId,
    key: &Key,
    input_path: &Path,
    output_path: &Path,
    progress: Option<ProgressCallback<'_>>,
) -> EngineResult<ChunkDecryptResult> {
    log::info!("decrypting {} (streaming, {})", input_path.display(), algo.as_str());
    let stats = streaming::decrypt_streaming(algo, key, input_path, output_path, progress)?;
    Ok(ChunkDecryptResult {
        original_size_kb: to_kb(stats.original_size),
        total_bytes_kb: to_kb(stats.total_bytes),
        chunk_size: stats.chunk_size,
        total_chunks: stats.total_chunks,
    })
}

/// Byte size of a file as reported by the filesystem.
pub fn get_file_size(path: &Path) -> EngineResult<u64> {
    fileutil::get_file_size(path)
}

/// Lowercase hex MD5 digest of a file's contents, computed by streaming read.
pub fn compute_file_md5(path: &Path) -> EngineResult<String> {
    fileutil::compute_file_md5(path)
}
