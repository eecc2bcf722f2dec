//! Encoder settings and their environment overrides

use crate::error::EncodeError;
use crate::models::{ECLevel, MaskPattern, Version};
use std::env;

fn parse_u8(value: &str) -> Option<u8> {
    value.trim().parse::<u8>().ok()
}

pub(crate) fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_u8(&v))
        .map(|v| v != 0)
        .unwrap_or(default)
}

/// How the data mask is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskSelection {
    /// Always apply this pattern
    Fixed(MaskPattern),
    /// Try all eight patterns and keep the lowest penalty score
    Auto,
}

impl MaskSelection {
    /// Parse `auto` or a pattern number `0`-`7`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Some(MaskSelection::Auto);
        }
        parse_u8(value)
            .and_then(MaskPattern::from_bits)
            .map(MaskSelection::Fixed)
    }
}

impl Default for MaskSelection {
    fn default() -> Self {
        MaskSelection::Fixed(MaskPattern::Pattern0)
    }
}

/// Parse an error correction level name (`L`, `M`, `Q`, `H`, any case)
pub fn parse_ec_level(value: &str) -> Option<ECLevel> {
    match value.trim().to_ascii_uppercase().as_str() {
        "L" => Some(ECLevel::L),
        "M" => Some(ECLevel::M),
        "Q" => Some(ECLevel::Q),
        "H" => Some(ECLevel::H),
        _ => None,
    }
}

/// Settings for one encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Mask choice
    pub mask: MaskSelection,
    /// Smallest version the encoder may pick
    pub min_version: Version,
    /// Largest version the encoder may pick
    pub max_version: Version,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::L,
            mask: MaskSelection::default(),
            min_version: Version::MIN,
            max_version: Version::MAX,
        }
    }
}

impl EncoderConfig {
    /// Defaults overridden by `QR_EC_LEVEL`, `QR_MASK`, `QR_MIN_VERSION` and
    /// `QR_MAX_VERSION`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`EncoderConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(level) = lookup("QR_EC_LEVEL").as_deref().and_then(parse_ec_level) {
            config.ec_level = level;
        }
        if let Some(mask) = lookup("QR_MASK").as_deref().and_then(MaskSelection::parse) {
            config.mask = mask;
        }
        if let Some(v) = lookup("QR_MIN_VERSION")
            .as_deref()
            .and_then(parse_u8)
            .and_then(|v| Version::new(v).ok())
        {
            config.min_version = v;
        }
        if let Some(v) = lookup("QR_MAX_VERSION")
            .as_deref()
            .and_then(parse_u8)
            .and_then(|v| Version::new(v).ok())
        {
            config.max_version = v;
        }
        config
    }

    /// Set the error correction level
    pub fn with_ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Set the mask choice
    pub fn with_mask(mut self, mask: MaskSelection) -> Self {
        self.mask = mask;
        self
    }

    /// Restrict the versions the encoder may pick
    pub fn with_versions(mut self, min: Version, max: Version) -> Self {
        self.min_version = min;
        self.max_version = max;
        self
    }

    /// Check that the version range is not empty
    pub fn validate(&self) -> Result<(), EncodeError> {
        if self.min_version > self.max_version {
            return Err(EncodeError::VersionRange {
                min: self.min_version.number(),
                max: self.max_version.number(),
            });
        }
        Ok(())
    }
}
