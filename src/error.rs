//! Error types for encoding and symbol readback

use thiserror::Error;

/// Errors that can occur while building a QR symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Payload exceeds the largest supported version at the chosen level
    #[error("data too long for a version 1-10 symbol: {len} bytes, max {max} bytes")]
    DataTooLong { len: usize, max: usize },

    /// Version number outside 1-10
    #[error("unsupported QR version {0}, expected 1-10")]
    InvalidVersion(u8),

    /// Configured minimum version is above the maximum
    #[error("empty version range: min {min} is above max {max}")]
    VersionRange { min: u8, max: u8 },

    /// Bit stream does not fit the data codewords of the version
    #[error("bit stream overflow: {bits} bits for a {capacity}-bit capacity")]
    Overflow { bits: usize, capacity: usize },
}

/// Errors that can occur while reading a finished symbol back into bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadbackError {
    /// Matrix side length does not match any supported version
    #[error("matrix size {0} is not a version 1-10 symbol")]
    InvalidSize(usize),

    /// The two format info copies decode to different values
    #[error("format info copies disagree")]
    FormatMismatch,

    /// Format info is not one of the 32 valid codewords
    #[error("format info 0x{0:04X} is not a valid codeword")]
    UnknownFormat(u16),

    /// A block has a non-zero Reed-Solomon syndrome
    #[error("Reed-Solomon check failed in block {block}")]
    Checksum { block: usize },

    /// Mode indicator other than byte mode or terminator
    #[error("unsupported mode indicator {0:#06b}")]
    UnsupportedMode(u8),

    /// Bit stream shorter than its character count claims
    #[error("bit stream ended early")]
    Truncated,
}
