//! Huffman encoder.
//!
//! Encoding is a pure function of the input bytes and the configuration:
//! the same input always yields a byte-identical container.

use crate::code::CodeTable;
use crate::container::{ContainerHeader, write_container};
use crate::frequency::FrequencyTable;
use oxipack_core::bitstream::BitWriter;
use oxipack_core::config::CodecConfig;
use oxipack_core::error::{OxiPackError, Result};
use std::io::Write;
use tracing::debug;

/// Canonical Huffman encoder.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    /// Create an encoder with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `data` into a header and a bit-packed payload.
    pub fn encode(&self, data: &[u8]) -> Result<(ContainerHeader, Vec<u8>)> {
        let frequencies = FrequencyTable::build(data);
        let table = CodeTable::from_frequencies(&frequencies, self.config.max_code_length);
        let header = ContainerHeader::new(data.len() as u64, table.lengths());

        let payload_bits = table.encoded_bits(&frequencies);
        debug!(
            input_bytes = data.len(),
            symbols = table.symbol_count(),
            max_code_length = table.max_length(),
            payload_bits,
            "built code table"
        );

        let mut writer = BitWriter::new(Vec::with_capacity(payload_bits.div_ceil(8) as usize));
        encode_symbols(&table, data, &mut writer)?;
        let payload = writer.into_inner()?;

        Ok((header, payload))
    }

    /// Encode `data` and write the complete container.
    ///
    /// Returns the number of bytes written.
    pub fn compress_to<W: Write>(&self, data: &[u8], writer: &mut W) -> Result<u64> {
        let (header, payload) = self.encode(data)?;
        write_container(writer, &header, &payload)
    }

    /// Encode `data` into a complete container buffer.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.compress_to(data, &mut out)?;
        Ok(out)
    }
}

/// Stream each byte's code through the bit writer.
pub fn encode_symbols<W: Write>(
    table: &CodeTable,
    data: &[u8],
    writer: &mut BitWriter<W>,
) -> Result<()> {
    for (offset, &byte) in data.iter().enumerate() {
        let code = table.get(byte).ok_or_else(|| {
            OxiPackError::corrupted(offset as u64, format!("no code for byte {byte:#04x}"))
        })?;
        writer.write_bits(code.bits, code.length)?;
    }
    Ok(())
}

/// Encode `data` with the default configuration.
pub fn encode(data: &[u8]) -> Result<(ContainerHeader, Vec<u8>)> {
    Encoder::default().encode(data)
}

/// Compress `data` into a complete container with the default configuration.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Encoder::default().compress(data)
}
