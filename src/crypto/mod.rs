// crypto/mod.rs - Cryptography module
//
// The mechanism layer: algorithm adapters, the frame and container codecs,
// the key newtype, and the whole-file/streaming encryptors built on top of
// them. This layer never logs and never validates caller-facing concerns
// like path existence; that lives in the public operations surface (`ops`).

pub mod algorithm;
pub mod container;
pub mod frame;
pub mod key;
pub mod streaming;
pub mod whole_file;

pub use algorithm::AlgorithmId;
pub use key::Key;
