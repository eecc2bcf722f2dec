//! QR code encoding modules
//!
//! This module contains all the logic for turning bytes into a symbol:
//! - Galois field arithmetic and Reed-Solomon error correction
//! - Bit stream assembly and block interleaving
//! - Function pattern layout, data placement and masking
//! - Format and version information

/// Bit stream assembly (mode, count, payload, padding)
pub mod bitstream;
/// Block splitting, EC codewords and interleaving
pub mod codewords;
/// Format information (EC level + mask, BCH protected)
pub mod format;
/// GF(256) arithmetic
pub mod gf256;
/// Module grid layout and zig-zag data placement
pub mod layout;
/// Data masks and penalty scoring
pub mod mask;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// QR standard tables (capacities, EC blocks, alignment centres)
pub mod tables;
/// Version selection and version information
pub mod version;

use crate::config::{EncoderConfig, MaskSelection};
use crate::debug::qr_debug;
use crate::error::EncodeError;
use crate::models::{QrCode, Version};
use bitstream::build_data_codewords;
use codewords::add_ec_and_interleave;
use format::FormatInfo;
use layout::Layout;
use mask::{apply_mask, select_mask};
use version::select_version;

/// Codeword sequence for one payload, before it is laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordPlan {
    /// Chosen version
    pub version: Version,
    /// Data codewords (mode, count, payload, padding)
    pub data_codewords: Vec<u8>,
    /// Interleaved data and EC codewords in placement order
    pub codewords: Vec<u8>,
}

impl CodewordPlan {
    /// Number of EC codewords across all blocks
    pub fn ec_len(&self) -> usize {
        self.codewords.len() - self.data_codewords.len()
    }
}

/// Byte-mode QR encoder
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// Create an encoder with the given settings
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode the UTF-8 bytes of `text`
    pub fn encode(&self, text: &str) -> Result<QrCode, EncodeError> {
        self.encode_bytes(text.as_bytes())
    }

    /// Encode raw bytes in the smallest version that fits
    pub fn encode_bytes(&self, data: &[u8]) -> Result<QrCode, EncodeError> {
        let plan = self.plan(data)?;
        Ok(self.build(&plan))
    }

    /// Encode raw bytes into a specific version
    pub fn encode_with_version(
        &self,
        data: &[u8],
        version: Version,
    ) -> Result<QrCode, EncodeError> {
        let plan = self.plan_for_version(data, version)?;
        Ok(self.build(&plan))
    }

    /// Pick a version and produce the final codeword sequence
    pub fn plan(&self, data: &[u8]) -> Result<CodewordPlan, EncodeError> {
        self.config.validate()?;
        let version = select_version(
            data.len(),
            self.config.ec_level,
            self.config.min_version,
            self.config.max_version,
        )?;
        self.plan_for_version(data, version)
    }

    fn plan_for_version(&self, data: &[u8], version: Version) -> Result<CodewordPlan, EncodeError> {
        let ec_level = self.config.ec_level;
        let data_codewords = build_data_codewords(data, version, ec_level)?;
        let codewords = add_ec_and_interleave(&data_codewords, version, ec_level);

        qr_debug!(
            "ENCODE: {} bytes -> version {} level {:?}, {} data + {} ec codewords",
            data.len(),
            version.number(),
            ec_level,
            data_codewords.len(),
            codewords.len() - data_codewords.len()
        );

        Ok(CodewordPlan {
            version,
            data_codewords,
            codewords,
        })
    }

    fn build(&self, plan: &CodewordPlan) -> QrCode {
        let ec_level = self.config.ec_level;
        let mut layout = Layout::new(plan.version);
        let placed = layout.place_data(&plan.codewords);
        qr_debug!(
            "LAYOUT: placed {} bits into {} data modules",
            placed,
            layout.data_cells().len()
        );

        let (modules, reserved) = layout.into_parts();
        let (mask_pattern, modules) = match self.config.mask {
            MaskSelection::Fixed(mask) => {
                let mut modules = modules;
                apply_mask(&mut modules, &reserved, mask);
                FormatInfo::new(ec_level, mask).place(&mut modules);
                (mask, modules)
            }
            MaskSelection::Auto => select_mask(&modules, &reserved, ec_level),
        };
        qr_debug!("MASK: using {:?}", mask_pattern);

        QrCode {
            version: plan.version,
            error_correction: ec_level,
            mask_pattern,
            modules,
            reserved,
        }
    }
}
