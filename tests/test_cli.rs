use std::process::Command;
use tempfile::tempdir;

const BINARY: &str = env!("CARGO_BIN_EXE_phyloprep");

#[test]
fn test_missing_input_reported_once() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.fasta");

    let output = Command::new(BINARY)
        .env_remove("RUST_LOG")
        .arg("--input")
        .arg(&missing)
        .arg("--adjusted")
        .arg(dir.path().join("adjusted.fasta"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "Command output: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("I/O error on").count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("missing.fasta"));
    assert!(!dir.path().join("adjusted.fasta").exists());
}

#[test]
fn test_invalid_gap_char_rejected() {
    let output = Command::new(BINARY).arg("--gap-char").arg("ab").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("single ASCII character"));
}
