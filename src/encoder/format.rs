/// Format information: EC level and mask pattern, BCH(15,5) protected
use crate::error::ReadbackError;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

// Generator x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_XOR_MASK: u16 = 0x5412;

// Index: ec_level.ordinal() * 8 + mask
const FORMAT_INFO: [u16; 32] = [
    0x77c4, 0x72f3, 0x7daa, 0x789d, 0x662f, 0x6318, 0x6c41, 0x6976, // L
    0x5412, 0x5125, 0x5e7c, 0x5b4b, 0x45f9, 0x40ce, 0x4f97, 0x4aa0, // M
    0x355f, 0x3068, 0x3f31, 0x3a06, 0x24b4, 0x2183, 0x2eda, 0x2bed, // Q
    0x1689, 0x13be, 0x1ce7, 0x19d0, 0x0762, 0x0255, 0x0d0c, 0x083b, // H
];

/// Format info is 15 bits (5 data + 10 ECC), written twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Pair a level with a mask
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// Masked 15-bit codeword from the fixed table
    pub fn bits(&self) -> u16 {
        FORMAT_INFO[self.ec_level.ordinal() * 8 + self.mask_pattern.bits() as usize]
    }

    /// Masked 15-bit codeword computed with the BCH generator
    pub fn compute_bits(&self) -> u16 {
        let data = ((self.ec_level.format_bits() << 3) | self.mask_pattern.bits()) as u32;
        let mut rem = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
        }
        (((data << 10) | (rem & 0x3ff)) as u16) ^ FORMAT_XOR_MASK
    }

    /// Decode a masked codeword, tolerating up to 3 flipped bits
    pub fn decode(bits: u16) -> Option<Self> {
        let (index, distance) = FORMAT_INFO
            .iter()
            .enumerate()
            .map(|(i, &candidate)| (i, (candidate ^ bits).count_ones()))
            .min_by_key(|&(_, d)| d)?;
        if distance > 3 {
            return None;
        }
        let ec_level = ECLevel::ALL[index / 8];
        let mask_pattern = MaskPattern::from_bits((index % 8) as u8)?;
        Some(Self::new(ec_level, mask_pattern))
    }

    /// Write both copies into `modules`
    pub fn place(&self, modules: &mut BitMatrix) {
        let bits = self.bits();
        let size = modules.width();
        let (first, second) = positions(size);
        for i in 0..15 {
            let bit = (bits >> i) & 1 == 1;
            let (row, col) = first[i];
            modules.set(col, row, bit);
            let (row, col) = second[i];
            modules.set(col, row, bit);
        }
    }

    /// Read both copies back; they must agree
    pub fn read(modules: &BitMatrix) -> Result<Self, ReadbackError> {
        let size = modules.width();
        let (first, second) = positions(size);
        let read_copy = |cells: &[(usize, usize); 15]| {
            cells
                .iter()
                .enumerate()
                .fold(0u16, |acc, (i, &(row, col))| {
                    acc | ((modules.get(col, row) as u16) << i)
                })
        };
        let a = read_copy(&first);
        let b = read_copy(&second);
        if a != b {
            return Err(ReadbackError::FormatMismatch);
        }
        Self::decode(a).ok_or(ReadbackError::UnknownFormat(a))
    }
}

/// (row, col) of format bit i (LSB = 0) in the copy around the top-left
/// finder and in the copy split between the other two finders.
pub fn positions(size: usize) -> ([(usize, usize); 15], [(usize, usize); 15]) {
    let mut first = [(0, 0); 15];
    let mut second = [(0, 0); 15];
    for (i, cell) in first.iter_mut().enumerate() {
        *cell = match i {
            0..=5 => (i, 8),
            6 => (7, 8),
            7 => (8, 8),
            8 => (8, 7),
            _ => (8, 14 - i),
        };
    }
    for (i, cell) in second.iter_mut().enumerate() {
        *cell = if i < 8 {
            (8, size - 1 - i)
        } else {
            (size - 15 + i, 8)
        };
    }
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_bch() {
        for ec_level in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                let info = FormatInfo::new(ec_level, mask);
                assert_eq!(info.bits(), info.compute_bits(), "{ec_level:?} {mask:?}");
            }
        }
    }

    #[test]
    fn test_level_l_mask_0() {
        let info = FormatInfo::new(ECLevel::L, MaskPattern::Pattern0);
        assert_eq!(info.bits(), 0x77c4);
        assert_eq!(info.bits(), 0b111011111000100);
    }

    #[test]
    fn test_decode_with_errors() {
        let info = FormatInfo::new(ECLevel::Q, MaskPattern::Pattern5);
        assert_eq!(FormatInfo::decode(info.bits()), Some(info));
        assert_eq!(FormatInfo::decode(info.bits() ^ 0b100_0000_0000_0101), Some(info));
    }

    #[test]
    fn test_positions_are_distinct_and_avoid_timing() {
        let size = 21;
        let (first, second) = positions(size);
        let mut all: Vec<(usize, usize)> = first.iter().chain(second.iter()).copied().collect();
        assert!(all.iter().all(|&(r, c)| r != 6 && c != 6));
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 30);
        // Dark module cell stays outside the format copies
        assert!(!second.contains(&(size - 8, 8)));
    }

    #[test]
    fn test_place_and_read() {
        let mut modules = BitMatrix::square(25);
        let info = FormatInfo::new(ECLevel::H, MaskPattern::Pattern3);
        info.place(&mut modules);
        assert_eq!(FormatInfo::read(&modules), Ok(info));

        // Break one copy only
        let (first, _) = positions(25);
        let (row, col) = first[0];
        modules.toggle(col, row);
        assert_eq!(FormatInfo::read(&modules), Err(ReadbackError::FormatMismatch));
    }
}
