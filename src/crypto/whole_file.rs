// crypto/whole_file.rs - Whole-file encrypt/decrypt (legacy simple format)
//
// The degenerate single-frame case: read the entire file, seal it once with
// the algorithm adapter, and write `sealed_bytes` directly, with no
// container header and no length prefix. This format intentionally carries
// no algorithm tag, so a mismatched decrypt surfaces `AuthFailure` or
// `PaddingError` rather than a clear `AlgorithmMismatch` (see DESIGN.md's
// Open Question on this).

use std::fs;
use std::path::Path;

use crate::crypto::algorithm::{self, AlgorithmId};
use crate::crypto::key::Key;
use crate::error::EngineResult;
use crate::io_guard::OutputGuard;

/// Encrypt `input_path` to `output_path` in one shot: no header, just
/// `sealed_bytes` in the algorithm's native layout.
pub fn encrypt_file(
    algo: AlgorithmId,
    key: &Key,
    input_path: &Path,
    output_path: &Path,
) -> EngineResult<u64> {
    let plaintext = fs::read(input_path)?;
    let sealed = algorithm::seal(algo, key, &plaintext)?;

    let mut guard = OutputGuard::create(output_path)?;
    std::io::Write::write_all(guard.file_mut(), &sealed)?;
    guard.finish()?;

    Ok(sealed.len() as u64)
}

/// Decrypt `input_path` to `output_path` in one shot: the entire input is
/// `sealed_bytes`, opened once under `algo`/`key`.
pub fn decrypt_file(
    algo: AlgorithmId,
    key: &Key,
    input_path: &Path,
    output_path: &Path,
) -> EngineResult<(u64, u64)> {
    let sealed = fs::read(input_path)?;
    let encrypted_size = sealed.len() as u64;
    let plaintext = algorithm::open(algo, key, &sealed)?;
    let plaintext_size = plaintext.len() as u64;

    let mut guard = OutputGuard::create(output_path)?;
    std::io::Write::write_all(guard.file_mut(), &plaintext)?;
    guard.finish()?;

    Ok((plaintext_size, encrypted_size))
}
