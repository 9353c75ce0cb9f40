//! Huffman decoder.
//!
//! The decoder never sees a tree. It rebuilds the canonical code from the
//! header's lengths and walks the payload one bit at a time using a
//! length-indexed lookup: for each length it knows the first code, how many
//! codes have that length, and where their symbols start in a sorted list.

use crate::code::CodeTable;
use crate::container::{Container, ContainerHeader};
use oxipack_core::bitstream::BitReader;
use oxipack_core::config::{CodecConfig, MAX_CODE_LENGTH};
use oxipack_core::error::{OxiPackError, Result};
use std::io::Read;
use tracing::{debug, trace};

const LEN_SLOTS: usize = MAX_CODE_LENGTH as usize + 1;

/// Length-indexed canonical decoding table.
#[derive(Debug, Clone)]
pub struct CanonicalDecoder {
    /// First code of each length.
    first_code: [u64; LEN_SLOTS],
    /// Number of codes of each length.
    count: [u32; LEN_SLOTS],
    /// Index into `symbols` of the first symbol of each length.
    offset: [u32; LEN_SLOTS],
    /// Symbols sorted by (length, byte value).
    symbols: Vec<u8>,
    /// Longest code length.
    max_length: u8,
}

impl CanonicalDecoder {
    /// Build the lookup from a code table.
    pub fn new(table: &CodeTable) -> Self {
        let count = table.length_counts();

        let mut first_code = [0u64; LEN_SLOTS];
        let mut offset = [0u32; LEN_SLOTS];
        let mut code = 0u64;
        let mut index = 0u32;
        for len in 1..LEN_SLOTS {
            code = (code + u64::from(count[len - 1])) << 1;
            first_code[len] = code;
            offset[len] = index;
            index += count[len];
        }

        let mut symbols: Vec<(u8, u8)> = table.iter().map(|(s, c)| (c.length, s)).collect();
        symbols.sort_unstable();

        Self {
            first_code,
            count,
            offset,
            symbols: symbols.into_iter().map(|(_, s)| s).collect(),
            max_length: table.max_length(),
        }
    }

    /// Decode one symbol.
    #[inline]
    pub fn decode_symbol<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u8> {
        let start = reader.bits_read();
        let mut code = 0u64;

        for len in 1..=self.max_length as usize {
            code = (code << 1) | u64::from(reader.read_bits(1)?);
            let first = self.first_code[len];
            if code >= first && code - first < u64::from(self.count[len]) {
                let index = self.offset[len] as usize + (code - first) as usize;
                return Ok(self.symbols[index]);
            }
        }

        Err(OxiPackError::invalid_code(start))
    }
}

/// Canonical Huffman decoder.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: CodecConfig,
}

impl Decoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Decode a payload described by `header`.
    ///
    /// Produces exactly `header.original_length` bytes; trailing padding bits
    /// are ignored.
    pub fn decode(&self, header: &ContainerHeader, payload: &[u8]) -> Result<Vec<u8>> {
        let table = header.code_table()?;

        // Every code is at least one bit long.
        let available_bits = payload.len() as u64 * 8;
        if header.original_length > available_bits {
            return Err(OxiPackError::truncated(
                header.original_length - available_bits,
                available_bits,
            ));
        }

        let lookup = CanonicalDecoder::new(&table);
        let mut reader = BitReader::new(payload);
        let mut output = Vec::with_capacity(header.original_length as usize);

        for _ in 0..header.original_length {
            output.push(lookup.decode_symbol(&mut reader)?);
        }

        trace!(
            bits_read = reader.bits_read(),
            payload_bytes = payload.len(),
            "payload decoded"
        );
        Ok(output)
    }

    /// Parse a complete container, decode it and verify its checksum.
    pub fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let container = Container::parse(bytes)?;
        debug!(
            original_length = container.header.original_length,
            symbols = container.header.symbol_count(),
            payload_bytes = container.payload.len(),
            "parsed container header"
        );

        let output = self.decode(&container.header, container.payload)?;
        if self.config.verify_checksum {
            container.verify_checksum()?;
        }
        Ok(output)
    }
}

/// Decode a payload with the default configuration.
pub fn decode(header: &ContainerHeader, payload: &[u8]) -> Result<Vec<u8>> {
    Decoder::default().decode(header, payload)
}

/// Decompress a complete container with the default configuration.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    Decoder::default().decompress(bytes)
}
