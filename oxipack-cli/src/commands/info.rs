//! Info command implementation.

use super::CmdResult;
use crate::utils::{require_input, savings_percent};
use oxipack_core::OxiPackError;
use oxipack_huffman::{Container, MAGIC, VERSION};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Header-level facts about a container.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerSummary {
    file: String,
    format: String,
    version: u8,
    original_size: u64,
    compressed_size: u64,
    symbol_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    shortest_code: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longest_code: Option<u8>,
    header_size: usize,
    payload_size: usize,
    checksum: String,
    checksum_ok: bool,
    savings_percent: f64,
}

impl ContainerSummary {
    /// Summarize a container without decoding the payload.
    pub fn from_bytes(file: &Path, bytes: &[u8]) -> Result<Self, OxiPackError> {
        let container = Container::parse(bytes)?;
        let header = &container.header;
        let lengths = header.code_lengths.iter().map(|&(_, l)| l);

        Ok(Self {
            file: file.display().to_string(),
            format: String::from_utf8_lossy(&MAGIC).into_owned(),
            version: VERSION,
            original_size: header.original_length,
            compressed_size: bytes.len() as u64,
            symbol_count: header.symbol_count(),
            shortest_code: lengths.clone().min(),
            longest_code: lengths.max(),
            header_size: header.encoded_len(),
            payload_size: container.payload.len(),
            checksum: format!("{:#010x}", container.checksum),
            checksum_ok: container.verify_checksum().is_ok(),
            savings_percent: savings_percent(header.original_length, bytes.len() as u64),
        })
    }

    fn print(&self) {
        println!("Container Information");
        println!("=====================");
        println!("File: {}", self.file);
        println!("Format: {} v{}", self.format, self.version);
        println!("Original size: {} bytes", self.original_size);
        println!("Compressed size: {} bytes", self.compressed_size);
        println!("Space savings: {:.1}%", self.savings_percent);
        println!();
        println!("Code table:");
        println!("  Symbols: {}", self.symbol_count);
        if let (Some(shortest), Some(longest)) = (self.shortest_code, self.longest_code) {
            println!("  Code lengths: {}-{} bits", shortest, longest);
        }
        println!();
        println!("Layout:");
        println!("  Header: {} bytes", self.header_size);
        println!("  Payload: {} bytes", self.payload_size);
        println!(
            "  Checksum: {} ({})",
            self.checksum,
            if self.checksum_ok { "ok" } else { "MISMATCH" }
        );
    }
}

pub fn cmd_info(file: &Path, json: bool) -> CmdResult<()> {
    require_input(file)?;
    let bytes = fs::read(file)?;
    let summary = ContainerSummary::from_bytes(file, &bytes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print();
    }
    Ok(())
}
