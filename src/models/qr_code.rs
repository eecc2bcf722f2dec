use super::BitMatrix;
use crate::error::EncodeError;

/// QR Code Model 2 version within the supported range (1-10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest supported version
    pub const MIN: Version = Version(1);
    /// Largest supported version
    pub const MAX: Version = Version(10);

    /// Create a version, rejecting numbers outside 1-10
    pub fn new(number: u8) -> Result<Self, EncodeError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&number) {
            Ok(Self(number))
        } else {
            Err(EncodeError::InvalidVersion(number))
        }
    }

    /// Get the version number
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Width of the byte-mode character count indicator
    pub fn char_count_bits(&self) -> usize {
        if self.0 <= 9 { 8 } else { 16 }
    }

    /// Iterate every version from `self` through `last`, inclusive
    pub fn range_to(self, last: Version) -> impl Iterator<Item = Version> {
        (self.0..=last.0).map(Version)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    #[default]
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// All levels in ascending redundancy order
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two-bit indicator stored in format info (L=01, M=00, Q=11, H=10)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// Position in L, M, Q, H order, used to index the codeword tables
    pub fn ordinal(&self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    #[default]
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in reference order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its three-bit reference
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }

    /// Three-bit reference stored in format info
    pub fn bits(&self) -> u8 {
        *self as u8
    }

    /// Check if module at (row i, col j) should be flipped
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// Encoded QR code symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    /// Symbol version
    pub version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern applied to the data modules
    pub mask_pattern: MaskPattern,
    /// Module matrix (true = dark, false = light), indexed (column, row)
    pub modules: BitMatrix,
    /// Function-module map; true cells were never touched by data or masking
    pub reserved: BitMatrix,
}

impl QrCode {
    /// Modules per side
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Module at (row, col); true = dark
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.modules.get(col, row)
    }

    /// Whether (row, col) holds a function module
    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.reserved.get(col, row)
    }

    /// Module rows as boolean vectors, top to bottom
    pub fn rows(&self) -> Vec<Vec<bool>> {
        let size = self.size();
        (0..size)
            .map(|row| (0..size).map(|col| self.get(row, col)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_size() {
        assert_eq!(Version::new(1).unwrap().size(), 21);
        assert_eq!(Version::new(2).unwrap().size(), 25);
        assert_eq!(Version::MAX.size(), 57);
    }

    #[test]
    fn test_version_bounds() {
        assert_eq!(Version::new(0), Err(EncodeError::InvalidVersion(0)));
        assert_eq!(Version::new(11), Err(EncodeError::InvalidVersion(11)));
        assert_eq!(Version::MIN.range_to(Version::MAX).count(), 10);
    }

    #[test]
    fn test_char_count_bits_boundary() {
        assert_eq!(Version::new(9).unwrap().char_count_bits(), 8);
        assert_eq!(Version::new(10).unwrap().char_count_bits(), 16);
    }

    #[test]
    fn test_ec_level_format_bits() {
        for level in ECLevel::ALL {
            assert_eq!(ECLevel::from_format_bits(level.format_bits()), level);
        }
        assert_eq!(ECLevel::L.format_bits(), 0b01);
        assert_eq!(ECLevel::H.format_bits(), 0b10);
    }

    #[test]
    fn test_mask_pattern() {
        let mask = MaskPattern::Pattern0;
        assert!(mask.is_masked(0, 0));
        assert!(!mask.is_masked(0, 1));
        assert!(mask.is_masked(1, 1));
        assert_eq!(MaskPattern::from_bits(5), Some(MaskPattern::Pattern5));
        assert_eq!(MaskPattern::from_bits(8), None);
    }
}
