//! # OxiPack Huffman
//!
//! Canonical Huffman compression of a single byte stream into an OXPK
//! container.
//!
//! ## Pipeline
//!
//! ```text
//! bytes ─► FrequencyTable ─► CodeTable ─► ContainerHeader (lengths only)
//!                                 │
//!                                 └──► BitWriter ─► payload ─► CRC-32 trailer
//! ```
//!
//! Decompression parses the header, rebuilds the same canonical table from
//! the lengths, decodes exactly `original_length` bytes and then checks the
//! payload CRC.
//!
//! ## Example
//!
//! ```rust
//! use oxipack_huffman::{compress, decompress};
//!
//! let original = b"aaaabbbcc";
//! let container = compress(original).unwrap();
//! assert_eq!(&container[..4], b"OXPK");
//!
//! let restored = decompress(&container).unwrap();
//! assert_eq!(restored, original);
//! ```
//!
//! ## Errors
//!
//! Decoding reports [`OxiPackError::BadMagic`], [`OxiPackError::UnsupportedVersion`]
//! and [`OxiPackError::CorruptHeader`] for header problems, and
//! [`OxiPackError::TruncatedStream`], [`OxiPackError::InvalidCode`] and
//! [`OxiPackError::ChecksumMismatch`] for payload problems.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod container;
pub mod decode;
pub mod encode;
pub mod frequency;

pub use code::{CodeTable, Codeword};
pub use container::{Container, ContainerHeader, EXTENSION, MAGIC, VERSION, write_container};
pub use decode::{CanonicalDecoder, Decoder, decode, decompress};
pub use encode::{Encoder, compress, encode};
pub use frequency::FrequencyTable;
pub use oxipack_core::{CodecConfig, OxiPackError, Result};
