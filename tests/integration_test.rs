use std::fs;
use std::path::{Path, PathBuf};

use filecrypt_engine::{
    chunk_decrypt_file, chunk_encrypt_file, compute_file_md5, decrypt_file, encrypt_file,
    get_file_size, AlgorithmId, EngineError, Key,
};
use tempfile::tempdir;

fn write_input_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn key(byte: u8) -> Key {
    Key::from_slice(&[byte; 32]).unwrap()
}

#[test]
fn test_whole_file_roundtrip_both_algorithms() {
    let dir = tempdir().unwrap();
    let input_path = write_input_file(dir.path(), "input.txt", b"secret content");
    let k = key(0x11);

    for algo in [AlgorithmId::AesCbc256, AlgorithmId::ChaCha20Poly1305] {
        let encrypted_path = dir.path().join(format!("encrypted_{}.bin", algo.as_str()));
        let decrypted_path = dir.path().join(format!("decrypted_{}.txt", algo.as_str()));

        encrypt_file(algo, &k, &input_path, &encrypted_path).unwrap();
        decrypt_file(algo, &k, &encrypted_path, &decrypted_path).unwrap();

        assert_eq!(fs::read(&decrypted_path).unwrap(), b"secret content");
    }
}

#[test]
fn test_streaming_roundtrip_multi_chunk() {
    let dir = tempdir().unwrap();
    let content: Vec<u8> = (0..5_000_000u32).map(|i| (i % 256) as u8).collect();
    let input_path = write_input_file(dir.path(), "input.bin", &content);
    let encrypted_path = dir.path().join("encrypted.bin");
    let decrypted_path = dir.path().join("decrypted.bin");

    let k = key(0x22);
    let encrypt_result =
        chunk_encrypt_file(AlgorithmId::AesCbc256, &k, &input_path, &encrypted_path, 1, None)
            .unwrap();
    assert_eq!(encrypt_result.total_chunks, 5);

    let decrypt_result = chunk_decrypt_file(
        AlgorithmId::AesCbc256,
        &k,
        &encrypted_path,
        &decrypted_path,
        None,
    )
    .unwrap();
    assert_eq!(decrypt_result.total_chunks, 5);
    assert_eq!(fs::read(&decrypted_path).unwrap(), content);
}

#[test]
fn test_streaming_wrong_key_fails_and_cleans_up() {
    let dir = tempdir().unwrap();
    let input_path = write_input_file(dir.path(), "input.bin", b"some plaintext data");
    let encrypted_path = dir.path().join("encrypted.bin");
    let decrypted_path = dir.path().join("decrypted.bin");

    chunk_encrypt_file(
        AlgorithmId::ChaCha20Poly1305,
        &key(1),
        &input_path,
        &encrypted_path,
        1,
        None,
    )
    .unwrap();

    let result = chunk_decrypt_file(
        AlgorithmId::ChaCha20Poly1305,
        &key(2),
        &encrypted_path,
        &decrypted_path,
        None,
    );
    assert!(matches!(result, Err(EngineError::AuthFailure)));
    assert!(!decrypted_path.exists());
}

#[test]
fn test_invalid_key_length_rejected_before_any_io() {
    let result = Key::from_slice(&[0u8; 20]);
    assert!(matches!(result, Err(EngineError::InvalidKeyLength(20))));
}

#[test]
fn test_file_size_and_md5_utilities() {
    let dir = tempdir().unwrap();
    let input_path = write_input_file(dir.path(), "data.bin", b"hello world\n");

    assert_eq!(get_file_size(&input_path).unwrap(), 12);
    assert_eq!(
        compute_file_md5(&input_path).unwrap(),
        "6f5902ac237024bdd0c176cb93063dc4"
    );
}

#[test]
fn test_md5_idempotent_across_empty_and_large_files() {
    let dir = tempdir().unwrap();

    let empty_path = write_input_file(dir.path(), "empty.bin", b"");
    assert_eq!(
        compute_file_md5(&empty_path).unwrap(),
        "d41d8cd98f00b204e9800998ecf8427e"
    );

    let large_content = vec![0x5Au8; 3_000_000];
    let large_path = write_input_file(dir.path(), "large.bin", &large_content);
    let digest_first = compute_file_md5(&large_path).unwrap();
    let digest_second = compute_file_md5(&large_path).unwrap();
    assert_eq!(digest_first, digest_second);
}

#[test]
fn test_cross_algorithm_streaming_decrypt_reports_mismatch() {
    let dir = tempdir().unwrap();
    let input_path = write_input_file(dir.path(), "input.bin", b"algorithm mismatch test");
    let encrypted_path = dir.path().join("encrypted.bin");
    let decrypted_path = dir.path().join("decrypted.bin");

    let k = key(9);
    chunk_encrypt_file(AlgorithmId::AesCbc256, &k, &input_path, &encrypted_path, 1, None).unwrap();

    let result = chunk_decrypt_file(
        AlgorithmId::ChaCha20Poly1305,
        &k,
        &encrypted_path,
        &decrypted_path,
        None,
    );
    assert!(matches!(result, Err(EngineError::AlgorithmMismatch { .. })));
}

#[test]
fn test_empty_file_streaming_roundtrip() {
    let dir = tempdir().unwrap();
    let input_path = write_input_file(dir.path(), "empty.bin", b"");
    let encrypted_path = dir.path().join("encrypted.bin");
    let decrypted_path = dir.path().join("decrypted.bin");

    let k = key(3);
    let encrypt_result =
        chunk_encrypt_file(AlgorithmId::AesCbc256, &k, &input_path, &encrypted_path, 1, None)
            .unwrap();
    assert_eq!(encrypt_result.total_chunks, 0);

    chunk_decrypt_file(AlgorithmId::AesCbc256, &k, &encrypted_path, &decrypted_path, None).unwrap();
    assert_eq!(fs::read(&decrypted_path).unwrap(), b"");
}
