/// Bit stream assembly for byte-mode symbols
use super::tables::data_codewords;
use crate::error::EncodeError;
use crate::models::{ECLevel, Version};

/// Byte mode indicator
pub const MODE_BYTE: u32 = 0b0100;

const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Growable MSB-first bit sequence
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32);
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether no bits were appended
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in append order
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Pack into bytes; a partial final byte is zero-filled
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Serialize `data` into the data codewords of `version`.
///
/// Layout: mode, character count, payload, terminator, zero fill to a byte
/// boundary, then alternating pad codewords up to capacity.
pub fn build_data_codewords(
    data: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>, EncodeError> {
    let capacity_bits = data_codewords(version, ec_level) * 8;
    let count_bits = version.char_count_bits();

    let needed = 4 + count_bits + data.len() * 8;
    if needed > capacity_bits || data.len() >= 1 << count_bits {
        return Err(EncodeError::Overflow {
            bits: needed,
            capacity: capacity_bits,
        });
    }

    let mut buffer = BitBuffer::with_capacity(capacity_bits);
    buffer.append_bits(MODE_BYTE, 4);
    buffer.append_bits(data.len() as u32, count_bits);
    for &byte in data {
        buffer.append_bits(byte as u32, 8);
    }

    let terminator = (capacity_bits - buffer.len()).min(4);
    buffer.append_bits(0, terminator);
    let fill = (8 - buffer.len() % 8) % 8;
    buffer.append_bits(0, fill);

    let mut codewords = buffer.to_bytes();
    let target = capacity_bits / 8;
    let missing = target.saturating_sub(codewords.len());
    codewords.extend(PAD_CODEWORDS.iter().cycle().take(missing));

    Ok(codewords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_bits_msb_first() {
        let mut buffer = BitBuffer::new();
        buffer.append_bits(0b0100, 4);
        buffer.append_bits(5, 8);
        assert_eq!(buffer.len(), 12);
        assert_eq!(
            buffer.bits(),
            &[
                false, true, false, false, false, false, false, false, false, true, false, true
            ]
        );
        assert_eq!(buffer.to_bytes(), vec![0x40, 0x50]);
    }

    #[test]
    fn test_hello_codewords() {
        let codewords = build_data_codewords(b"HELLO", Version::MIN, ECLevel::L).unwrap();
        assert_eq!(codewords.len(), 19);
        assert_eq!(
            &codewords[..7],
            &[0x40, 0x54, 0x84, 0x54, 0xC4, 0xC4, 0xF0]
        );
        for (i, &pad) in codewords[7..].iter().enumerate() {
            assert_eq!(pad, if i % 2 == 0 { 0xEC } else { 0x11 });
        }
    }

    #[test]
    fn test_empty_payload() {
        let codewords = build_data_codewords(b"", Version::MIN, ECLevel::L).unwrap();
        assert_eq!(codewords.len(), 19);
        assert_eq!(&codewords[..3], &[0x40, 0x00, 0xEC]);
    }

    #[test]
    fn test_full_version_1_has_no_pad() {
        let data = [0xA5u8; 17];
        let codewords = build_data_codewords(&data, Version::MIN, ECLevel::L).unwrap();
        assert_eq!(codewords.len(), 19);
        // 12 header bits + 136 payload bits leave exactly 4 terminator bits
        assert_eq!(codewords[0], 0x41);
        assert_eq!(codewords[18] & 0x0F, 0);
        assert!(!codewords.contains(&0xEC));
    }

    #[test]
    fn test_version_10_uses_16_bit_count() {
        let v10 = Version::MAX;
        let codewords = build_data_codewords(b"AB", v10, ECLevel::L).unwrap();
        // 0100 | 0000000000000010 | 'A' ...
        assert_eq!(&codewords[..4], &[0x40, 0x00, 0x24, 0x14]);
        assert_eq!(codewords.len(), 274);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let data = [0u8; 18];
        let err = build_data_codewords(&data, Version::MIN, ECLevel::L).unwrap_err();
        assert_eq!(
            err,
            EncodeError::Overflow {
                bits: 4 + 8 + 144,
                capacity: 152
            }
        );
    }
}
