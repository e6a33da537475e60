//! End-to-end checks of the `compress` and `uncompress` binaries

use std::fs;
use std::process::Command;

const COMPRESS: &str = env!("CARGO_BIN_EXE_compress");
const UNCOMPRESS: &str = env!("CARGO_BIN_EXE_uncompress");

#[test]
fn test_wrong_arg_count_prints_usage() {
    for bin in [COMPRESS, UNCOMPRESS] {
        let out = Command::new(bin).arg("only-one").output().unwrap();
        assert_eq!(out.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("Correct usage"), "stderr: {}", stderr);
        assert!(stderr.contains("[input] [output]"));
    }
}

#[test]
fn test_same_path_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("data.bin");
    fs::write(&file, b"keep me").unwrap();

    let out = Command::new(COMPRESS).arg(&file).arg(&file).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("must be different"));
    assert_eq!(fs::read(&file).unwrap(), b"keep me");
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::new(COMPRESS)
        .arg(dir.path().join("absent"))
        .arg(dir.path().join("out"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error"));
}

#[test]
fn test_binaries_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let packed = dir.path().join("in.huf");
    let restored = dir.path().join("out.txt");
    let data = b"she sells sea shells by the sea shore".repeat(20);
    fs::write(&input, &data).unwrap();

    let status = Command::new(COMPRESS).arg(&input).arg(&packed).status().unwrap();
    assert!(status.success());
    let status = Command::new(UNCOMPRESS).arg(&packed).arg(&restored).status().unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&restored).unwrap(), data);
}
