//! Command implementations for OxiPack CLI.

pub mod compress;
pub mod decompress;
pub mod info;

pub use compress::{CompressOptions, cmd_compress};
pub use decompress::cmd_decompress;
pub use info::cmd_info;
pub use test::cmd_test;

use crate::utils::{Confirm, is_non_empty_file};
use std::io;
use std::path::{Path, PathBuf};

/// Result type shared by all commands.
pub type CmdResult<T> = Result<T, Box<dyn std::error::Error>>;

/// What a writing command ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Output was written.
    Written {
        /// Destination file.
        output: PathBuf,
        /// Bytes read from the input.
        input_len: u64,
        /// Bytes written to the output.
        output_len: u64,
    },
    /// The user declined to overwrite a non-empty output file.
    Declined,
}

/// Ask before clobbering a non-empty `output`. Missing or empty files need
/// no confirmation.
pub fn may_overwrite(output: &Path, confirm: &mut dyn Confirm) -> io::Result<bool> {
    if !is_non_empty_file(output) {
        return Ok(true);
    }
    confirm.confirm(&format!(
        "The output file '{}' is not empty. Continue?",
        output.display()
    ))
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::utils::Confirm;
    use std::io;

    /// Scripted answer that records every question.
    #[derive(Debug, Default)]
    pub struct Scripted {
        pub answer: bool,
        pub asked: Vec<String>,
    }

    impl Scripted {
        pub fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: Vec::new(),
            }
        }
    }

    impl Confirm for Scripted {
        fn confirm(&mut self, message: &str) -> io::Result<bool> {
            self.asked.push(message.to_string());
            Ok(self.answer)
        }
    }
}
