// crypto/algorithm.rs - Uniform seal/open over AES-256-CBC and ChaCha20-Poly1305
//
// One adapter per algorithm family: AES-256-CBC with PKCS#7 padding (the
// `cbc`/`aes` crates, `cbc::Encryptor<Aes256>`) and ChaCha20-Poly1305 AEAD
// (the `chacha20poly1305` crate). Both draw a fresh IV/nonce from the OS
// CSPRNG on every call and check the key length before touching the
// primitive.
//
// `seal`/`open` are the only two entry points; everything else in this
// module is a private implementation detail of one algorithm or the other.

use std::fmt;
use std::str::FromStr;

use aes::Aes256;
use cbc::cipher::block_padding::{Pkcs7, UnpadError};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use chacha20poly1305::{aead::Aead, ChaCha20Poly1305, KeyInit, Nonce as ChaChaNonce};
use rand::{rngs::OsRng, TryRngCore};

use crate::crypto::key::Key;
use crate::error::{EngineError, EngineResult};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// IV size for AES-256-CBC (128-bit block size).
const CBC_IV_SIZE: usize = 16;

/// Nonce size for ChaCha20-Poly1305 (96 bits).
const CHACHA_NONCE_SIZE: usize = 12;

/// AEAD authentication tag size for ChaCha20-Poly1305.
const CHACHA_TAG_SIZE: usize = 16;

/// Algorithm family identifier, shared by the container header and the
/// public operations surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmId {
    AesCbc256,
    ChaCha20Poly1305,
}

impl AlgorithmId {
    /// Wire code stored in the container header.
    pub fn to_wire_code(self) -> u16 {
        match self {
            AlgorithmId::AesCbc256 => 1,
            AlgorithmId::ChaCha20Poly1305 => 2,
        }
    }

    /// Parse a wire code read from a container header.
    pub fn from_wire_code(code: u16) -> EngineResult<Self> {
        match code {
            1 => Ok(AlgorithmId::AesCbc256),
            2 => Ok(AlgorithmId::ChaCha20Poly1305),
            other => Err(EngineError::UnknownAlgorithm(format!(
                "wire code {other}"
            ))),
        }
    }

    /// Parse the public-surface algorithm string: `"aes"` or
    /// `"chacha20poly1305"`.
    pub fn from_str_id(s: &str) -> EngineResult<Self> {
        match s {
            "aes" => Ok(AlgorithmId::AesCbc256),
            "chacha20poly1305" => Ok(AlgorithmId::ChaCha20Poly1305),
            other => Err(EngineError::UnknownAlgorithm(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmId::AesCbc256 => "aes",
            AlgorithmId::ChaCha20Poly1305 => "chacha20poly1305",
        }
    }
}

impl FromStr for AlgorithmId {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        Self::from_str_id(s)
    }
}

impl AlgorithmId {
    /// Worst-case bytes added to a plaintext chunk by `seal` for this
    /// algorithm: used to validate configured chunk sizes against the
    /// frame codec's 4-byte length-prefix ceiling.
    pub fn max_overhead_bytes(self) -> usize {
        match self {
            // IV (16) + up to one full block of PKCS#7 padding (16).
            AlgorithmId::AesCbc256 => CBC_IV_SIZE + 16,
            // nonce (12) + tag (16), no padding.
            AlgorithmId::ChaCha20Poly1305 => CHACHA_NONCE_SIZE + CHACHA_TAG_SIZE,
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seal `plaintext` under `key` using `algo`, producing a self-describing
/// blob sufficient to `open` given only the key.
pub fn seal(algo: AlgorithmId, key: &Key, plaintext: &[u8]) -> EngineResult<Vec<u8>> {
    match algo {
        AlgorithmId::AesCbc256 => seal_aes_cbc(key, plaintext),
        AlgorithmId::ChaCha20Poly1305 => seal_chacha20poly1305(key, plaintext),
    }
}

/// Inverse of `seal`.
pub fn open(algo: AlgorithmId, key: &Key, sealed: &[u8]) -> EngineResult<Vec<u8>> {
    match algo {
        AlgorithmId::AesCbc256 => open_aes_cbc(key, sealed),
        AlgorithmId::ChaCha20Poly1305 => open_chacha20poly1305(key, sealed),
    }
}

fn random_bytes<const N: usize>() -> EngineResult<[u8; N]> {
    let mut buf = [0u8; N];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| EngineError::CryptoError(format!("RNG failure: {e}")))?;
    Ok(buf)
}

fn seal_aes_cbc(key: &Key, plaintext: &[u8]) -> EngineResult<Vec<u8>> {
    let iv = random_bytes::<CBC_IV_SIZE>()?;
    let encryptor = Aes256CbcEnc::new(key.as_bytes().into(), &iv.into());
    let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut sealed = Vec::with_capacity(CBC_IV_SIZE + ciphertext.len());
    sealed.extend_from_slice(&iv);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

fn open_aes_cbc(key: &Key, sealed: &[u8]) -> EngineResult<Vec<u8>> {
    if sealed.len() < CBC_IV_SIZE {
        return Err(EngineError::PaddingError);
    }
    let (iv, ciphertext) = sealed.split_at(CBC_IV_SIZE);

    let decryptor = Aes256CbcDec::new(key.as_bytes().into(), iv.into());
    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_: UnpadError| EngineError::PaddingError)
}

fn seal_chacha20poly1305(key: &Key, plaintext: &[u8]) -> EngineResult<Vec<u8>> {
    let nonce_bytes = random_bytes::<CHACHA_NONCE_SIZE>()?;
    let nonce = ChaChaNonce::from_slice(&nonce_bytes);
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

    let ciphertext_and_tag = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| EngineError::CryptoError("ChaCha20-Poly1305 seal failed".to_string()))?;

    let mut sealed = Vec::with_capacity(CHACHA_NONCE_SIZE + ciphertext_and_tag.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext_and_tag);
    Ok(sealed)
}

fn open_chacha20poly1305(key: &Key, sealed: &[u8]) -> EngineResult<Vec<u8>> {
    if sealed.len() < CHACHA_NONCE_SIZE + CHACHA_TAG_SIZE {
        return Err(EngineError::AuthFailure);
    }
    let (nonce_bytes, ciphertext_and_tag) = sealed.split_at(CHACHA_NONCE_SIZE);
    let nonce = ChaChaNonce::from_slice(nonce_bytes);
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(nonce, ciphertext_and_tag)
        .map_err(|_| EngineError::AuthFailure)
}
