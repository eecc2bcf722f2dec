use crate::models::{ECLevel, Version};

/// Reed-Solomon block structure for one version and level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockInfo {
    /// Number of blocks the data is split into
    pub num_blocks: usize,
    /// EC codewords appended to each block
    pub ecc_per_block: usize,
}

// QR Code Model 2 block structure for versions 1-10.
// Index: [ec_level][version - 1]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 10]; 4] = [
    [7, 10, 15, 20, 26, 18, 20, 24, 30, 18],  // Low
    [10, 16, 26, 18, 24, 16, 18, 22, 22, 26], // Medium
    [13, 22, 18, 26, 18, 24, 18, 22, 20, 24], // Quartile
    [17, 28, 22, 16, 22, 28, 26, 26, 24, 28], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 10]; 4] = [
    [1, 1, 1, 1, 1, 2, 2, 2, 2, 4], // Low
    [1, 1, 1, 2, 2, 4, 4, 4, 5, 5], // Medium
    [1, 1, 2, 2, 4, 4, 6, 6, 8, 8], // Quartile
    [1, 1, 2, 4, 4, 4, 5, 6, 8, 8], // High
];

// Alignment pattern centre coordinates, shared by rows and columns.
const ALIGNMENT_POSITIONS: [&[usize]; 10] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
];

/// Block count and EC codewords per block
pub fn ec_block_info(version: Version, ec_level: ECLevel) -> EcBlockInfo {
    let v = version.number() as usize - 1;
    let idx = ec_level.ordinal();
    EcBlockInfo {
        num_blocks: NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize,
        ecc_per_block: ECC_CODEWORDS_PER_BLOCK[idx][v] as usize,
    }
}

/// Modules available for data and EC bits once every function pattern is placed.
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Data plus EC codewords in the symbol
pub fn total_codewords(version: Version) -> usize {
    raw_data_modules(version) / 8
}

/// Data modules left light after the last codeword
pub fn remainder_bits(version: Version) -> usize {
    raw_data_modules(version) % 8
}

/// Codewords left for the bit stream after EC
pub fn data_codewords(version: Version, ec_level: ECLevel) -> usize {
    let info = ec_block_info(version, ec_level);
    total_codewords(version) - info.num_blocks * info.ecc_per_block
}

/// Largest byte-mode payload that fits the version at this level
pub fn byte_capacity(version: Version, ec_level: ECLevel) -> usize {
    let header_bits = 4 + version.char_count_bits();
    (data_codewords(version, ec_level) * 8 - header_bits) / 8
}

/// Alignment centres for `version`; empty for version 1
pub fn alignment_positions(version: Version) -> &'static [usize] {
    ALIGNMENT_POSITIONS[version.number() as usize - 1]
}
