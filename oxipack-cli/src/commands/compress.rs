//! Compress command implementation.

use super::{CmdResult, Outcome, may_overwrite};
use crate::utils::{Confirm, create_spinner, default_compressed_path, require_input};
use oxipack_core::CodecConfig;
use oxipack_huffman::Encoder;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Options for `compress`.
#[derive(Debug, Clone, Copy)]
pub struct CompressOptions {
    /// Longest code the encoder may assign.
    pub max_code_length: u8,
    /// Show a spinner while encoding.
    pub progress: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_code_length: CodecConfig::DEFAULT.max_code_length,
            progress: false,
        }
    }
}

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    options: &CompressOptions,
    confirm: &mut dyn Confirm,
) -> CmdResult<Outcome> {
    require_input(input)?;
    let data = fs::read(input)?;
    debug!(input = %input.display(), bytes = data.len(), "read input");

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_compressed_path(input));
    if !may_overwrite(&output, confirm)? {
        return Ok(Outcome::Declined);
    }

    let spinner = create_spinner("Compressing", options.progress);
    let encoder = Encoder::new(CodecConfig::new(options.max_code_length));
    let container = encoder.compress(&data)?;
    spinner.finish_and_clear();

    fs::write(&output, &container)?;
    info!(
        output = %output.display(),
        original = data.len(),
        compressed = container.len(),
        "wrote container"
    );

    Ok(Outcome::Written {
        output,
        input_len: data.len() as u64,
        output_len: container.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Scripted;
    use oxipack_core::OxiPackError;
    use oxipack_huffman::decompress;

    #[test]
    fn test_compress_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(&input, b"aaaabbbcc").unwrap();

        let mut confirm = Scripted::new(false);
        let outcome = cmd_compress(&input, None, &CompressOptions::default(), &mut confirm).unwrap();

        let expected = dir.path().join("notes.compressed");
        assert!(matches!(&outcome, Outcome::Written { output, input_len: 9, .. } if *output == expected));
        assert!(confirm.asked.is_empty());
        assert_eq!(decompress(&fs::read(&expected).unwrap()).unwrap(), b"aaaabbbcc");
    }

    #[test]
    fn test_compress_declined_leaves_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.bin");
        fs::write(&input, b"payload").unwrap();
        fs::write(&output, b"keep me").unwrap();

        let mut confirm = Scripted::new(false);
        let outcome =
            cmd_compress(&input, Some(&output), &CompressOptions::default(), &mut confirm).unwrap();

        assert_eq!(outcome, Outcome::Declined);
        assert_eq!(confirm.asked.len(), 1);
        assert!(confirm.asked[0].contains("is not empty"));
        assert_eq!(fs::read(&output).unwrap(), b"keep me");
    }

    #[test]
    fn test_compress_overwrites_when_confirmed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.bin");
        fs::write(&input, b"payload").unwrap();
        fs::write(&output, b"old").unwrap();

        let mut confirm = Scripted::new(true);
        cmd_compress(&input, Some(&output), &CompressOptions::default(), &mut confirm).unwrap();
        assert_eq!(decompress(&fs::read(&output).unwrap()).unwrap(), b"payload");
    }

    #[test]
    fn test_compress_empty_output_needs_no_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.bin");
        fs::write(&input, b"").unwrap();
        fs::write(&output, b"").unwrap();

        let mut confirm = Scripted::new(false);
        let outcome =
            cmd_compress(&input, Some(&output), &CompressOptions::default(), &mut confirm).unwrap();
        assert!(matches!(outcome, Outcome::Written { input_len: 0, .. }));
        assert!(confirm.asked.is_empty());
    }

    #[test]
    fn test_compress_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.txt");
        let err = cmd_compress(&input, None, &CompressOptions::default(), &mut Scripted::new(true))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OxiPackError>(),
            Some(OxiPackError::InputNotFound { .. })
        ));
    }
}
