//! OxiPack CLI - canonical Huffman file compressor
//!
//! Compresses a single file into an `OXPK` container and restores it.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{CompressOptions, Outcome, cmd_compress, cmd_decompress, cmd_info, cmd_test};
use oxipack_core::MAX_CODE_LENGTH;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};
use utils::{AssumeYes, Confirm, StdinConfirm, savings_percent};

#[derive(Parser, Debug)]
#[command(name = "oxipack")]
#[command(
    author,
    version,
    propagate_version = true,
    about = "Canonical Huffman file compressor"
)]
#[command(long_about = "
OxiPack compresses a single file with a canonical Huffman code and stores it
in a self-describing container with a CRC-32 trailer.

Examples:
  oxipack compress notes.txt
  oxipack compress notes.txt notes.oxpk --max-code-length 16
  oxipack decompress notes.compressed
  oxipack test notes.compressed
  oxipack info notes.compressed --json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (default: input with a .compressed extension)
        output: Option<PathBuf>,

        /// Overwrite a non-empty output file without asking
        #[arg(short, long)]
        force: bool,

        /// Longest code the encoder may assign
        #[arg(
            short = 'm',
            long,
            default_value_t = MAX_CODE_LENGTH,
            value_parser = clap::value_parser!(u8).range(8..=32)
        )]
        max_code_length: u8,

        /// Show a spinner while encoding
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Restore a compressed file
    #[command(alias = "d")]
    Decompress {
        /// Container to decompress
        input: PathBuf,

        /// Output file (default: input without its .compressed extension)
        output: Option<PathBuf>,

        /// Overwrite a non-empty output file without asking
        #[arg(short, long)]
        force: bool,

        /// Show a spinner while decoding
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Verify a container without writing anything
    #[command(alias = "t")]
    Test {
        /// Container to test
        file: PathBuf,

        /// Show a spinner while decoding
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Show information about a container
    #[command(alias = "i")]
    Info {
        /// Container to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn confirmer(force: bool) -> Box<dyn Confirm> {
    if force {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    }
}

fn report(verb: &str, input: &std::path::Path, outcome: Outcome) {
    match outcome {
        Outcome::Written {
            output,
            input_len,
            output_len,
        } => {
            println!(
                "File '{}' {} successfully to '{}'.",
                input.display(),
                verb,
                output.display()
            );
            tracing::info!(
                input_len,
                output_len,
                savings_percent = savings_percent(input_len, output_len),
                "size summary"
            );
        }
        Outcome::Declined => {
            println!("Operation aborted due to existing output file.");
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            force,
            max_code_length,
            progress,
        } => {
            let options = CompressOptions {
                max_code_length,
                progress,
            };
            cmd_compress(
                &input,
                output.as_deref(),
                &options,
                confirmer(force).as_mut(),
            )
            .map(|outcome| report("compressed", &input, outcome))
        }
        Commands::Decompress {
            input,
            output,
            force,
            progress,
        } => cmd_decompress(&input, output.as_deref(), progress, confirmer(force).as_mut())
            .map(|outcome| report("decompressed", &input, outcome)),
        Commands::Test { file, progress } => cmd_test(&file, progress).map(|_| ()),
        Commands::Info { file, json } => cmd_info(&file, json),
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
