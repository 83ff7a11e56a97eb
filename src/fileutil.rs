// fileutil.rs - Byte-size query and streaming MD5 digest
//
// MD5 here is explicitly a non-cryptographic checksum used for integrity
// comparison, not a security primitive.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};

use crate::error::EngineResult;

/// Reads are chunked in 64 KiB units so arbitrarily large files never sit
/// fully in memory.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Return a file's size in bytes as reported by the filesystem.
pub fn get_file_size(path: &Path) -> EngineResult<u64> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata.len())
}

/// Compute the lowercase hex MD5 digest of a file's contents, streaming
/// fixed-size reads rather than loading the whole file.
pub fn compute_file_md5(path: &Path) -> EngineResult<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
