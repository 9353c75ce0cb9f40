//! End-to-end tests for the `oxipack` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn oxipack() -> Command {
    Command::cargo_bin("oxipack").expect("oxipack binary should be built for tests")
}

fn workspace_with(name: &str, contents: &[u8]) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

const TEXT: &[u8] = b"It was the best of times, it was the worst of times, \
it was the age of wisdom, it was the age of foolishness.";

#[test]
fn test_help_flag() {
    oxipack()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compress"))
        .stdout(predicate::str::contains("decompress"));
}

#[test]
fn test_version_flag() {
    oxipack()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_compress_then_decompress() {
    let (dir, input) = workspace_with("tale.txt", TEXT);
    let compressed = dir.path().join("tale.compressed");
    let restored = dir.path().join("tale.out");

    oxipack()
        .arg("compress")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("compressed successfully to"));
    assert!(compressed.exists());
    assert_eq!(&fs::read(&compressed).unwrap()[..4], b"OXPK");

    oxipack()
        .arg("decompress")
        .arg(&compressed)
        .arg(&restored)
        .assert()
        .success()
        .stdout(predicate::str::contains("decompressed successfully to"));
    assert_eq!(fs::read(&restored).unwrap(), TEXT);
}

#[test]
fn test_decompress_default_strips_extension() {
    let (dir, input) = workspace_with("data.bin", &[0u8, 1, 2, 3, 255, 255, 255]);
    let compressed = dir.path().join("data.compressed");

    oxipack().arg("compress").arg(&input).assert().success();
    fs::remove_file(&input).unwrap();

    oxipack().arg("decompress").arg(&compressed).assert().success();
    assert_eq!(
        fs::read(dir.path().join("data")).unwrap(),
        [0u8, 1, 2, 3, 255, 255, 255]
    );
}

#[test]
fn test_compress_with_length_limit() {
    let (dir, input) = workspace_with("limited.txt", TEXT);
    let output = dir.path().join("limited.oxpk");

    oxipack()
        .args(["compress", "--max-code-length", "8"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();
    oxipack().arg("test").arg(&output).assert().success();
}

#[test]
fn test_length_limit_out_of_range() {
    let (_dir, input) = workspace_with("x.txt", TEXT);
    oxipack()
        .args(["compress", "--max-code-length", "4"])
        .arg(&input)
        .assert()
        .failure();
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    oxipack()
        .arg("compress")
        .arg(dir.path().join("nowhere.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_declined_overwrite_exits_cleanly() {
    let (dir, input) = workspace_with("in.txt", TEXT);
    let output = dir.path().join("out.bin");
    fs::write(&output, b"precious").unwrap();

    oxipack()
        .arg("compress")
        .arg(&input)
        .arg(&output)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("is not empty"))
        .stdout(predicate::str::contains("aborted"));
    assert_eq!(fs::read(&output).unwrap(), b"precious");
}

#[test]
fn test_confirmed_overwrite() {
    let (dir, input) = workspace_with("in.txt", TEXT);
    let output = dir.path().join("out.bin");
    fs::write(&output, b"stale").unwrap();

    oxipack()
        .arg("compress")
        .arg(&input)
        .arg(&output)
        .write_stdin(" Y \n")
        .assert()
        .success();
    assert_eq!(&fs::read(&output).unwrap()[..4], b"OXPK");
}

#[test]
fn test_force_skips_prompt() {
    let (dir, input) = workspace_with("in.txt", TEXT);
    let output = dir.path().join("out.bin");
    fs::write(&output, b"stale").unwrap();

    oxipack()
        .args(["compress", "--force"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("is not empty").not());
}

#[test]
fn test_corrupted_container_is_rejected() {
    let (dir, input) = workspace_with("in.txt", TEXT);
    let compressed = dir.path().join("in.compressed");
    let restored = dir.path().join("restored.txt");
    oxipack().arg("compress").arg(&input).assert().success();

    let mut bytes = fs::read(&compressed).unwrap();
    let in_payload = bytes.len() - 6;
    bytes[in_payload] ^= 0x10;
    fs::write(&compressed, &bytes).unwrap();

    oxipack()
        .arg("decompress")
        .arg(&compressed)
        .arg(&restored)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
    assert!(!restored.exists());
}

#[test]
fn test_not_a_container() {
    let (_dir, input) = workspace_with("plain.txt", b"just some text");
    oxipack()
        .arg("decompress")
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("magic"));
}

#[test]
fn test_test_command() {
    let (dir, input) = workspace_with("in.txt", TEXT);
    oxipack().arg("compress").arg(&input).assert().success();

    oxipack()
        .arg("test")
        .arg(dir.path().join("in.compressed"))
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn test_info_json() {
    let (dir, input) = workspace_with("abc.txt", b"aaaabbbcc");
    oxipack().arg("compress").arg(&input).assert().success();

    let output = oxipack()
        .args(["info", "--json"])
        .arg(dir.path().join("abc.compressed"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["format"], "OXPK");
    assert_eq!(value["original_size"], 9);
    assert_eq!(value["symbol_count"], 3);
    assert_eq!(value["checksum_ok"], true);
}

#[test]
fn test_info_text() {
    let (dir, input) = workspace_with("abc.txt", b"aaaabbbcc");
    oxipack().arg("compress").arg(&input).assert().success();

    oxipack()
        .arg("info")
        .arg(dir.path().join("abc.compressed"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Format: OXPK v1"))
        .stdout(predicate::str::contains("Symbols: 3"));
}
