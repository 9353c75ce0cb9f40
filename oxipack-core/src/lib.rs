//! # OxiPack Core
//!
//! Core components for the OxiPack compressor.
//!
//! - [`bitstream`]: MSB-first bit-level I/O and varints
//! - [`crc`]: CRC-32 payload checksum
//! - [`config`]: Codec configuration
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     compress / decompress / info / test                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec + Container                                   │
//! │     Frequency model, canonical Huffman, OXPK container  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, CRC-32, errors, config         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipack_core::bitstream::{BitReader, BitWriter};
//! use oxipack_core::crc::Crc32;
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b110, 3).unwrap();
//! let bytes = writer.into_inner().unwrap();
//! assert_eq!(bytes, vec![0b1100_0000]);
//!
//! let mut reader = BitReader::new(Cursor::new(bytes));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b110);
//!
//! assert_eq!(Crc32::compute(b"Hello, World!"), 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod config;
pub mod crc;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use config::{CodecConfig, MAX_CODE_LENGTH};
pub use crc::Crc32;
pub use error::{OxiPackError, Result};
