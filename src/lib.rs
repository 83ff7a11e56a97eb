// lib.rs - Streaming symmetric file encryption engine
//
// Public library root. Re-exports the operations surface (`ops`), the error
// taxonomy, and the mechanism-layer types a caller needs to construct a
// `Key`/`AlgorithmId` and invoke an operation.

pub mod crypto;
pub mod error;
mod fileutil;
mod io_guard;
pub mod ops;

pub use crypto::{AlgorithmId, Key};
pub use error::{EngineError, EngineResult};
pub use ops::{
    chunk_decrypt_file, chunk_encrypt_file, compute_file_md5, decrypt_file, encrypt_file,
    get_file_size, ChunkDecryptResult, ChunkEncryptResult, DecryptResult, EncryptResult,
};
