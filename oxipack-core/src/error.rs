//! Error types for OxiPack operations.
//!
//! Every failure the codec can produce is a variant of [`OxiPackError`].
//! Container-level problems (magic, version, header) are kept apart from
//! payload-level problems (truncation, checksum) so callers can tell a file
//! that was never an OxiPack container from one that was damaged in transit.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for OxiPack operations.
#[derive(Debug, Error)]
pub enum OxiPackError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input file does not exist.
    #[error("The input file '{}' does not exist", path.display())]
    InputNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Leading bytes are not the container magic.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    BadMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Container version is not one this build understands.
    #[error("Unsupported container version {found} (this build reads version {supported})")]
    UnsupportedVersion {
        /// Version byte read from the container.
        found: u8,
        /// Version this build writes and reads.
        supported: u8,
    },

    /// Header fields are inconsistent (e.g. code lengths violate Kraft).
    #[error("Corrupt header: {message}")]
    CorruptHeader {
        /// Description of the header error.
        message: String,
    },

    /// Stream ended before the requested bits or bytes were available.
    #[error("Truncated stream: needed {needed} more bits at bit position {bit_position}")]
    TruncatedStream {
        /// Bits that were requested but not available.
        needed: u64,
        /// Bit position where the stream ran out.
        bit_position: u64,
    },

    /// Payload checksum does not match the stored value.
    #[error(
        "Checksum mismatch: header was valid but payload is corrupted \
         (stored {expected:#010x}, computed {computed:#010x})"
    )]
    ChecksumMismatch {
        /// CRC value stored in the container.
        expected: u32,
        /// CRC value computed from the payload.
        computed: u32,
    },

    /// Bit pattern that is not assigned to any symbol.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidCode {
        /// Bit position where the invalid code started.
        bit_position: u64,
    },

    /// Malformed data that is not covered by a more specific variant.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },
}

/// Result type alias for OxiPack operations.
pub type Result<T> = std::result::Result<T, OxiPackError>;

impl OxiPackError {
    /// Create an input-not-found error.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a bad magic error.
    pub fn bad_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::BadMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported version error.
    pub fn unsupported_version(found: u8, supported: u8) -> Self {
        Self::UnsupportedVersion { found, supported }
    }

    /// Create a corrupt header error.
    pub fn corrupt_header(message: impl Into<String>) -> Self {
        Self::CorruptHeader {
            message: message.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(needed: u64, bit_position: u64) -> Self {
        Self::TruncatedStream {
            needed,
            bit_position,
        }
    }

    /// Create a checksum mismatch error.
    pub fn checksum_mismatch(expected: u32, computed: u32) -> Self {
        Self::ChecksumMismatch { expected, computed }
    }

    /// Create an invalid code error.
    pub fn invalid_code(bit_position: u64) -> Self {
        Self::InvalidCode { bit_position }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Whether the error describes the container header rather than the payload.
    pub fn is_header_error(&self) -> bool {
        matches!(
            self,
            Self::BadMagic { .. } | Self::UnsupportedVersion { .. } | Self::CorruptHeader { .. }
        )
    }
}
