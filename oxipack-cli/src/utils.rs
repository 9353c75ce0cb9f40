//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxipack_core::OxiPackError;
use oxipack_huffman::EXTENSION;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A yes/no question put to the user.
pub trait Confirm {
    /// Ask `message`; `true` means go ahead.
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// Reads one answer line from standard input.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{message} (y/n): ")?;
        stdout.flush()?;
        read_answer(&mut io::stdin().lock())
    }
}

/// Answers yes without asking (`--force`).
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _message: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Read one line; only `y` (any case, surrounding whitespace ignored) is yes.
pub fn read_answer<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

/// Append `.suffix` to the full file name (`a.txt` → `a.txt.suffix`).
fn append_extension(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

/// Default output for `compress`: the input's extension replaced by
/// `.compressed`, or appended if it already is `.compressed`.
pub fn default_compressed_path(input: &Path) -> PathBuf {
    if has_extension(input, EXTENSION) {
        append_extension(input, EXTENSION)
    } else {
        input.with_extension(EXTENSION)
    }
}

/// Default output for `decompress`: `.compressed` stripped, otherwise
/// `.decompressed` appended.
pub fn default_decompressed_path(input: &Path) -> PathBuf {
    if has_extension(input, EXTENSION) {
        input.with_extension("")
    } else {
        append_extension(input, "decompressed")
    }
}

/// Fail with [`OxiPackError::InputNotFound`] if `path` does not exist.
pub fn require_input(path: &Path) -> Result<(), OxiPackError> {
    if !path.exists() {
        return Err(OxiPackError::input_not_found(path));
    }
    Ok(())
}

/// `true` if `path` exists and is not empty.
pub fn is_non_empty_file(path: &Path) -> bool {
    path.metadata().map(|m| m.len() > 0).unwrap_or(false)
}

/// Create a spinner with standard styling.
pub fn create_spinner(message: &str, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .expect("spinner template is valid"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Space savings as a percentage (negative when the output grew).
pub fn savings_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}
