//! qrforge - QR Code Model 2 encoder
//!
//! Byte-mode symbols, versions 1 to 10, all four error correction levels.
//! Includes a readback path that decodes a finished grid back into bytes and
//! a small renderer for PNG and terminal output.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Encoder settings and environment overrides
pub mod config;
/// Reading finished symbols back into bytes
pub mod decoder;
/// QR code encoding modules (RS, bit stream, layout, masking, format info)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QrCode, BitMatrix, Version, etc.)
pub mod models;
/// PNG, image and ASCII output
pub mod render;

mod debug;

pub use config::{EncoderConfig, MaskSelection};
pub use decoder::{read_back, Decoded};
pub use encoder::Encoder;
pub use error::{EncodeError, ReadbackError};
pub use models::{BitMatrix, ECLevel, MaskPattern, QrCode, Version};

/// Encode text with the default settings (level L, mask 0, smallest version)
///
/// # Arguments
/// * `text` - Text to encode; its UTF-8 bytes go into one byte-mode segment
///
/// # Returns
/// The finished symbol, or [`EncodeError::DataTooLong`] past 271 bytes
pub fn encode(text: &str) -> Result<QrCode, EncodeError> {
    Encoder::default().encode(text)
}

/// Encode raw bytes with the default settings
pub fn encode_bytes(data: &[u8]) -> Result<QrCode, EncodeError> {
    Encoder::default().encode_bytes(data)
}
