//! Bit-level I/O operations for the Huffman codec.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level, which is what variable-length prefix codes need.
//!
//! # Bit Ordering
//!
//! OxiPack packs bits MSB-first: the first bit written lands in bit 7 of the
//! first byte. A canonical Huffman code is therefore written exactly as it
//! reads, most significant code bit first, and no bit reversal is needed on
//! either side. The final partial byte is padded with zero bits in its low
//! positions.
//!
//! # Example
//!
//! ```
//! use oxipack_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//!     writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{OxiPackError, Result};
use std::io::{ErrorKind, Read, Write};

/// Maximum number of bits moved by a single `read_bits`/`write_bits` call.
pub const MAX_BITS_PER_CALL: u8 = 32;

/// Maximum number of 7-bit groups in an encoded `u64` varint.
const MAX_VARINT_GROUPS: u32 = 10;

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bits are consumed MSB-first. Running out of input is reported as
/// [`OxiPackError::TruncatedStream`], never as a short read.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer; the valid bits are the low `bits_in_buffer` bits.
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Ensure at least `count` bits are available in the buffer.
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        while self.bits_in_buffer < count {
            let bytes_needed = (count - self.bits_in_buffer).div_ceil(8) as usize;
            let mut temp_buf = [0u8; 4];
            let n = match self.reader.read(&mut temp_buf[..bytes_needed]) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if n == 0 {
                return Err(OxiPackError::truncated(
                    u64::from(count - self.bits_in_buffer),
                    self.total_bits_read,
                ));
            }
            for &byte in &temp_buf[..n] {
                self.buffer = (self.buffer << 8) | u64::from(byte);
                self.bits_in_buffer += 8;
            }
        }
        Ok(())
    }

    /// Read up to 32 bits from the stream.
    ///
    /// The first bit read ends up as the most significant of the `count`
    /// returned bits.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(
            count <= MAX_BITS_PER_CALL,
            "Cannot read more than 32 bits at once"
        );

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = ((self.buffer >> shift) & mask) as u32;

        self.bits_in_buffer -= count;
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
        self.total_bits_read += u64::from(count);

        Ok(value)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Discard bits up to the next byte boundary.
    pub fn align_to_byte(&mut self) {
        let remainder = self.bits_in_buffer % 8;
        if remainder > 0 {
            self.bits_in_buffer -= remainder;
            self.buffer &= (1u64 << self.bits_in_buffer) - 1;
            self.total_bits_read += u64::from(remainder);
        }
    }

    /// Read an unsigned LEB128 varint written by [`BitWriter::write_varint`].
    pub fn read_varint(&mut self) -> Result<u64> {
        let start = self.total_bits_read / 8;
        let mut value = 0u64;

        for group in 0..MAX_VARINT_GROUPS {
            let byte = self.read_bits(8)? as u64;
            let payload = byte & 0x7F;
            if group == MAX_VARINT_GROUPS - 1 && payload > 1 {
                return Err(OxiPackError::corrupted(start, "varint overflows u64"));
            }
            value |= payload << (7 * group);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }

        Err(OxiPackError::corrupted(
            start,
            "varint longer than 10 groups",
        ))
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and writes complete
/// bytes to the underlying writer. Call `flush()` when done to write any
/// remaining partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer; the pending bits are the low `bits_in_buffer` bits.
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Flush pending bits and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Get the total number of bits written so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        let mut bytes = [0u8; 5];
        let mut n = 0;
        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            bytes[n] = (self.buffer >> self.bits_in_buffer) as u8;
            n += 1;
        }
        if n > 0 {
            self.writer.write_all(&bytes[..n])?;
            self.buffer &= (1u64 << self.bits_in_buffer) - 1;
        }
        Ok(())
    }

    /// Write the low `count` bits of `value` (0-32), most significant first.
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(
            count <= MAX_BITS_PER_CALL,
            "Cannot write more than 32 bits at once"
        );

        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (u64::from(value) & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += u64::from(count);

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(u32::from(bit), 1)
    }

    /// Pad to byte boundary with zeros.
    pub fn align_to_byte(&mut self) -> Result<()> {
        if self.bits_in_buffer % 8 != 0 {
            let padding = 8 - (self.bits_in_buffer % 8);
            self.write_bits(0, padding)?;
            // Padding is not payload.
            self.total_bits_written -= u64::from(padding);
        }
        Ok(())
    }

    /// Write an unsigned LEB128 varint: 7 bits per group, low group first,
    /// bit 7 set on every group but the last.
    pub fn write_varint(&mut self, mut value: u64) -> Result<()> {
        loop {
            let group = (value & 0x7F) as u32;
            value >>= 7;
            if value == 0 {
                return self.write_bits(group, 8);
            }
            self.write_bits(group | 0x80, 8)?;
        }
    }

    /// Flush any remaining bits to the underlying writer.
    ///
    /// If there are partial bits, they are padded with zeros to complete
    /// the final byte.
    pub fn flush(&mut self) -> Result<()> {
        self.align_to_byte()?;
        self.flush_bytes()?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitreader_basic() {
        // 0b10110101 = 0xB5
        let data = vec![0xB5];
        let mut reader = BitReader::new(Cursor::new(data));

        assert!(reader.read_bit().unwrap()); // MSB first
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.bits_read(), 8);
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = vec![0xFF, 0x00];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0xF0); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), 0x0);
    }

    #[test]
    fn test_bitreader_32_bits() {
        let data = vec![0xDE, 0xAD, 0xBE, 0xEF, 0x80];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(32).unwrap(), 0xBD5B7DDF);
    }

    #[test]
    fn test_bitreader_truncated() {
        let data = vec![0xAB];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(5).unwrap(), 0b10101);
        let err = reader.read_bits(4).unwrap_err();
        assert!(matches!(
            err,
            OxiPackError::TruncatedStream {
                needed: 1,
                bit_position: 5
            }
        ));
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            for bit in [true, false, true, true, false, true, false, true] {
                writer.write_bit(bit).unwrap();
            }
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_pads_with_zeros() {
        let mut output = Vec::new();
        let mut writer = BitWriter::new(&mut output);
        writer.write_bits(0b111, 3).unwrap();
        writer.write_bits(0b1_1111_1111, 9).unwrap();
        assert_eq!(writer.bits_written(), 12);
        writer.flush().unwrap();
        assert_eq!(writer.bits_written(), 12);
        drop(writer);
        assert_eq!(output, vec![0xFF, 0xF0]);
    }

    #[test]
    fn test_bitwriter_masks_high_bits() {
        let output = {
            let mut writer = BitWriter::new(Vec::new());
            writer.write_bits(0xFFFF_FF05, 4).unwrap();
            writer.write_bits(0, 4).unwrap();
            writer.into_inner().unwrap()
        };
        assert_eq!(output, vec![0x50]);
    }

    #[test]
    fn test_roundtrip() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b101, 3).unwrap();
            writer.write_bits(0b1111, 4).unwrap();
            writer.write_bits(0b10, 2).unwrap();
            writer.write_bits(0xCAFE_BABE, 32).unwrap();
            writer.write_bits(0b110011, 6).unwrap();
            writer.flush().unwrap();
        }

        let mut reader = BitReader::new(Cursor::new(&output));
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(32).unwrap(), 0xCAFE_BABE);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
    }

    #[test]
    fn test_align_to_byte() {
        let data = vec![0xFF, 0xAA];
        let mut reader = BitReader::new(Cursor::new(data));

        reader.read_bits(3).unwrap();
        reader.align_to_byte();
        assert_eq!(reader.bits_read(), 8);
        assert_eq!(reader.read_bits(8).unwrap(), 0xAA);
    }

    #[test]
    fn test_varint() {
        let values = [0u64, 1, 127, 128, 300, u32::MAX as u64, u64::MAX];
        let output = {
            let mut writer = BitWriter::new(Vec::new());
            writer.write_bit(true).unwrap();
            for &v in &values {
                writer.write_varint(v).unwrap();
            }
            writer.into_inner().unwrap()
        };

        let mut reader = BitReader::new(Cursor::new(&output));
        assert!(reader.read_bit().unwrap());
        for &v in &values {
            assert_eq!(reader.read_varint().unwrap(), v);
        }
    }

    #[test]
    fn test_varint_encoding() {
        let output = {
            let mut writer = BitWriter::new(Vec::new());
            writer.write_varint(300).unwrap();
            writer.into_inner().unwrap()
        };
        assert_eq!(output, vec![0xAC, 0x02]);
    }

    #[test]
    fn test_varint_overflow() {
        let data = vec![0xFF; 11];
        let mut reader = BitReader::new(Cursor::new(data));
        assert!(matches!(
            reader.read_varint(),
            Err(OxiPackError::CorruptedData { .. })
        ));
    }
}
