//! OXPK container format.
//!
//! ```text
//! offset  size            field
//! 0       4               magic "OXPK"
//! 4       1               version (1)
//! 5       8               original length, u64 LE
//! 13      2               symbol count, u16 LE (0-256)
//! 15      2 × count       (byte value, code length) pairs, ascending byte value
//! ..      ..              payload: canonical codes, MSB-first, zero padded
//! end-4   4               CRC-32 of the payload, u32 LE
//! ```
//!
//! Only code lengths are stored; the decoder derives the codes canonically.
//! The version byte is bumped on any layout change and readers reject
//! versions they do not know.

use crate::code::CodeTable;
use crate::frequency::ALPHABET_SIZE;
use oxipack_core::Crc32;
use oxipack_core::error::{OxiPackError, Result};
use std::io::Write;

/// Container magic bytes.
pub const MAGIC: [u8; 4] = *b"OXPK";

/// Container version written and accepted by this build.
pub const VERSION: u8 = 1;

/// Size of the fixed header fields before the code length pairs.
pub const FIXED_HEADER_SIZE: usize = 15;

/// Size of the CRC-32 trailer.
pub const CHECKSUM_SIZE: usize = 4;

/// Conventional file extension for compressed output.
pub const EXTENSION: &str = "compressed";

/// Container header: everything before the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Length of the uncompressed input in bytes.
    pub original_length: u64,
    /// `(byte value, code length)` for every symbol present, ascending.
    pub code_lengths: Vec<(u8, u8)>,
}

impl ContainerHeader {
    /// Create a header.
    pub fn new(original_length: u64, code_lengths: Vec<(u8, u8)>) -> Self {
        Self {
            original_length,
            code_lengths,
        }
    }

    /// Number of symbols with a code.
    pub fn symbol_count(&self) -> usize {
        self.code_lengths.len()
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_SIZE + 2 * self.code_lengths.len()
    }

    /// Rebuild the canonical code table from the stored lengths.
    pub fn code_table(&self) -> Result<CodeTable> {
        if self.code_lengths.is_empty() && self.original_length > 0 {
            return Err(OxiPackError::corrupt_header(format!(
                "no code lengths for {} bytes of output",
                self.original_length
            )));
        }
        CodeTable::from_lengths(&self.code_lengths)
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.code_lengths.len() > ALPHABET_SIZE {
            return Err(OxiPackError::corrupt_header(format!(
                "{} symbols exceed the alphabet size",
                self.code_lengths.len()
            )));
        }

        writer.write_all(&MAGIC)?;
        writer.write_all(&[VERSION])?;
        writer.write_all(&self.original_length.to_le_bytes())?;
        writer.write_all(&(self.code_lengths.len() as u16).to_le_bytes())?;
        for &(symbol, length) in &self.code_lengths {
            writer.write_all(&[symbol, length])?;
        }
        Ok(())
    }

    /// Serialize the header into a new buffer.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write(&mut out)?;
        Ok(out)
    }

    /// Parse a header from the start of `bytes`.
    ///
    /// Returns the header and the number of bytes it occupied.
    pub fn parse(bytes: &[u8]) -> Result<(Self, usize)> {
        let magic_len = bytes.len().min(MAGIC.len());
        if bytes[..magic_len] != MAGIC[..magic_len] {
            return Err(OxiPackError::bad_magic(MAGIC.to_vec(), bytes[..magic_len].to_vec()));
        }
        require(bytes, FIXED_HEADER_SIZE)?;

        let version = bytes[4];
        if version != VERSION {
            return Err(OxiPackError::unsupported_version(version, VERSION));
        }

        let mut length_bytes = [0u8; 8];
        length_bytes.copy_from_slice(&bytes[5..13]);
        let original_length = u64::from_le_bytes(length_bytes);

        let symbol_count = u16::from_le_bytes([bytes[13], bytes[14]]) as usize;
        if symbol_count > ALPHABET_SIZE {
            return Err(OxiPackError::corrupt_header(format!(
                "symbol count {symbol_count} exceeds {ALPHABET_SIZE}"
            )));
        }

        let end = FIXED_HEADER_SIZE + 2 * symbol_count;
        require(bytes, end)?;
        let code_lengths = bytes[FIXED_HEADER_SIZE..end]
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();

        Ok((Self::new(original_length, code_lengths), end))
    }
}

fn require(bytes: &[u8], needed: usize) -> Result<()> {
    if bytes.len() < needed {
        return Err(OxiPackError::truncated(
            ((needed - bytes.len()) * 8) as u64,
            (bytes.len() * 8) as u64,
        ));
    }
    Ok(())
}

/// A parsed container borrowing its payload from the input buffer.
#[derive(Debug, Clone)]
pub struct Container<'a> {
    /// Parsed header.
    pub header: ContainerHeader,
    /// Bit-packed payload.
    pub payload: &'a [u8],
    /// CRC-32 stored in the trailer.
    pub checksum: u32,
}

impl<'a> Container<'a> {
    /// Split a complete container into header, payload and checksum.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let (header, header_len) = ContainerHeader::parse(bytes)?;
        require(bytes, header_len + CHECKSUM_SIZE)?;

        let trailer = bytes.len() - CHECKSUM_SIZE;
        let payload = &bytes[header_len..trailer];
        let checksum = u32::from_le_bytes([
            bytes[trailer],
            bytes[trailer + 1],
            bytes[trailer + 2],
            bytes[trailer + 3],
        ]);

        Ok(Self {
            header,
            payload,
            checksum,
        })
    }

    /// CRC-32 of the payload as it is now.
    pub fn computed_checksum(&self) -> u32 {
        Crc32::compute(self.payload)
    }

    /// Compare the stored checksum with the payload.
    pub fn verify_checksum(&self) -> Result<()> {
        let computed = self.computed_checksum();
        if computed != self.checksum {
            return Err(OxiPackError::checksum_mismatch(self.checksum, computed));
        }
        Ok(())
    }

    /// Total container size in bytes.
    pub fn total_len(&self) -> usize {
        self.header.encoded_len() + self.payload.len() + CHECKSUM_SIZE
    }
}

/// Write a complete container. Returns the number of bytes written.
pub fn write_container<W: Write>(
    writer: &mut W,
    header: &ContainerHeader,
    payload: &[u8],
) -> Result<u64> {
    header.write(writer)?;
    writer.write_all(payload)?;
    writer.write_all(&Crc32::compute(payload).to_le_bytes())?;
    Ok((header.encoded_len() + payload.len() + CHECKSUM_SIZE) as u64)
}
