//! Decompress command implementation.

use super::{CmdResult, Outcome, may_overwrite};
use crate::utils::{Confirm, create_spinner, default_decompressed_path, require_input};
use oxipack_huffman::Decoder;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    progress: bool,
    confirm: &mut dyn Confirm,
) -> CmdResult<Outcome> {
    require_input(input)?;
    let container = fs::read(input)?;
    debug!(input = %input.display(), bytes = container.len(), "read container");

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_decompressed_path(input));
    if !may_overwrite(&output, confirm)? {
        return Ok(Outcome::Declined);
    }

    // Decode fully before touching the output so a bad container never
    // leaves a partial file behind.
    let spinner = create_spinner("Decompressing", progress);
    let result = Decoder::default().decompress(&container);
    spinner.finish_and_clear();
    let data = result?;

    fs::write(&output, &data)?;
    info!(
        output = %output.display(),
        compressed = container.len(),
        restored = data.len(),
        "restored original"
    );

    Ok(Outcome::Written {
        output,
        input_len: container.len() as u64,
        output_len: data.len() as u64,
    })
}
