//! Runs the lzwc binary against files in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const LOREM_IPSUM: &[u8] = include_bytes!("../test-assets/lorem_ipsum.txt");

fn lzwc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lzwc"))
        .args(args)
        .output()
        .expect("Failed to run lzwc")
}

fn path(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

fn round_trip(dir: &TempDir, data: &[u8], compress: &str, decompress: &str) -> Vec<u8> {
    let original = path(dir, "original");
    let compressed = path(dir, "compressed");
    let restored = path(dir, "restored");
    fs::write(&original, data).expect("Failed to write input");

    let output = lzwc(&[compress, &original, &compressed]);
    assert!(output.status.success(), "{output:?}");
    let output = lzwc(&[decompress, &compressed, &restored]);
    assert!(output.status.success(), "{output:?}");

    assert_eq!(fs::read(&restored).expect("Failed to read output"), data);
    fs::read(&compressed).expect("Failed to read compressed file")
}

#[test]
fn compress_and_decompress_text() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let compressed = round_trip(&dir, LOREM_IPSUM, "compress", "decompress");

    assert!(compressed.len() < LOREM_IPSUM.len());
}

#[test]
fn short_mode_aliases() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let compressed = round_trip(&dir, b"abcabcabcabcabcabc", "c", "d");

    // Groups are 3 bytes, or 2 for a trailing odd code.
    assert_ne!(compressed.len() % 3, 1);
}

#[test]
fn empty_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let compressed = round_trip(&dir, b"", "compress", "decompress");

    assert!(compressed.is_empty());
}

#[test]
fn invalid_mode_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = path(&dir, "input");
    fs::write(&input, b"data").expect("Failed to write input");

    let output = lzwc(&["x", &input, &path(&dir, "output")]);

    assert!(!output.status.success());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = path(&dir, "output");

    let output = lzwc(&["compress", &path(&dir, "does-not-exist"), &output_path]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to open input file"));
    assert!(!Path::new(&output_path).exists());
}

#[test]
fn corrupted_input_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = path(&dir, "input");
    // First code 0xFFF is not a single byte.
    fs::write(&input, [0xFF, 0xF0]).expect("Failed to write input");

    let output = lzwc(&["decompress", &input, &path(&dir, "output")]);

    assert!(!output.status.success());
}
