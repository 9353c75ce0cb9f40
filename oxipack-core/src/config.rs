//! Codec configuration.

/// Longest code the container format can describe.
pub const MAX_CODE_LENGTH: u8 = 32;

/// Shortest length limit that still fits all 256 byte symbols.
pub const MIN_CODE_LENGTH_LIMIT: u8 = 8;

/// Codec configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Longest code length the encoder may assign (8-32).
    pub max_code_length: u8,
    /// Whether the decoder verifies the payload CRC-32.
    pub verify_checksum: bool,
}

impl CodecConfig {
    /// Full 32-bit code space, checksum verified.
    pub const DEFAULT: Self = Self {
        max_code_length: MAX_CODE_LENGTH,
        verify_checksum: true,
    };

    /// Codes capped at 16 bits.
    ///
    /// Costs a little ratio on heavily skewed input; keeps every code inside
    /// a single 16-bit lookup.
    pub const SHALLOW: Self = Self {
        max_code_length: 16,
        verify_checksum: true,
    };

    /// Create a configuration with the given code length limit.
    ///
    /// The limit is clamped to `8..=32`.
    pub fn new(max_code_length: u8) -> Self {
        Self {
            max_code_length: max_code_length.clamp(MIN_CODE_LENGTH_LIMIT, MAX_CODE_LENGTH),
            ..Self::DEFAULT
        }
    }

    /// Return a copy with checksum verification switched on or off.
    pub fn with_verify_checksum(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
