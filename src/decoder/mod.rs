//! Symbol readback
//!
//! Reads a finished module grid back into its payload: format info, unmasking,
//! zig-zag extraction, block deinterleaving with a syndrome check per block,
//! and byte-mode parsing. The grid is assumed to be axis-aligned with no
//! quiet zone, exactly as the encoder produces it.

mod payload;

use crate::debug::qr_debug;
use crate::encoder::codewords::block_lengths;
use crate::encoder::format::FormatInfo;
use crate::encoder::layout::{data_module_order, Layout};
use crate::encoder::mask::apply_mask;
use crate::encoder::reed_solomon::syndromes;
use crate::encoder::tables::{ec_block_info, total_codewords};
use crate::error::ReadbackError;
use crate::models::{BitMatrix, ECLevel, MaskPattern, QrCode, Version};
use payload::{bits_to_codewords, decode_payload};

/// Result of reading a symbol back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Payload bytes of every byte-mode segment
    pub data: Vec<u8>,
    /// Version implied by the grid size
    pub version: Version,
    /// Level read from format info
    pub ec_level: ECLevel,
    /// Mask read from format info
    pub mask_pattern: MaskPattern,
}

impl Decoded {
    /// Payload as UTF-8, if it is valid UTF-8
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

/// Read an encoded symbol back into its payload
pub fn read_back(code: &QrCode) -> Result<Decoded, ReadbackError> {
    read_matrix(&code.modules)
}

/// Read a bare module grid (no quiet zone) back into its payload
pub fn read_matrix(modules: &BitMatrix) -> Result<Decoded, ReadbackError> {
    let size = modules.width();
    let version = version_from_size(size).ok_or(ReadbackError::InvalidSize(size))?;
    if modules.height() != size {
        return Err(ReadbackError::InvalidSize(size));
    }

    let format = FormatInfo::read(modules)?;
    qr_debug!(
        "READBACK: version {} level {:?} mask {:?}",
        version.number(),
        format.ec_level,
        format.mask_pattern
    );

    let layout = Layout::new(version);
    let reserved = layout.reserved();
    let mut unmasked = modules.clone();
    apply_mask(&mut unmasked, reserved, format.mask_pattern);

    let bits: Vec<bool> = data_module_order(reserved)
        .into_iter()
        .map(|(row, col)| unmasked.get(col, row))
        .collect();
    let mut codewords = bits_to_codewords(&bits);
    codewords.truncate(total_codewords(version));

    let data_codewords = deinterleave_and_check(&codewords, version, format.ec_level)?;
    let data = decode_payload(&data_codewords, version)?;

    Ok(Decoded {
        data,
        version,
        ec_level: format.ec_level,
        mask_pattern: format.mask_pattern,
    })
}

fn version_from_size(size: usize) -> Option<Version> {
    if size < 21 || (size - 17) % 4 != 0 {
        return None;
    }
    let number = u8::try_from((size - 17) / 4).ok()?;
    Version::new(number).ok()
}

/// Split interleaved codewords back into blocks, verify each block's
/// syndromes and return the concatenated data codewords.
pub(crate) fn deinterleave_and_check(
    codewords: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>, ReadbackError> {
    let info = ec_block_info(version, ec_level);
    let ecc_total = info.num_blocks * info.ecc_per_block;
    if codewords.len() < ecc_total {
        return Err(ReadbackError::Truncated);
    }
    let data_total = codewords.len() - ecc_total;
    let lengths = block_lengths(version, ec_level, data_total);
    let long_len = lengths.iter().copied().max().unwrap_or(0);

    let mut blocks: Vec<Vec<u8>> = lengths
        .iter()
        .map(|&len| Vec::with_capacity(len + info.ecc_per_block))
        .collect();

    let mut stream = codewords.iter().copied();
    for i in 0..long_len {
        for (block, &len) in blocks.iter_mut().zip(&lengths) {
            if i < len {
                block.push(stream.next().ok_or(ReadbackError::Truncated)?);
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.push(stream.next().ok_or(ReadbackError::Truncated)?);
        }
    }

    let mut data_out = Vec::with_capacity(data_total);
    for (b, (block, &len)) in blocks.iter().zip(&lengths).enumerate() {
        if syndromes(block, info.ecc_per_block).iter().any(|&s| s != 0) {
            return Err(ReadbackError::Checksum { block: b });
        }
        data_out.extend_from_slice(&block[..len]);
    }

    Ok(data_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EncoderConfig, MaskSelection};
    use crate::encoder::codewords::add_ec_and_interleave;
    use crate::encoder::Encoder;

    #[test]
    fn test_version_from_size() {
        assert_eq!(version_from_size(21), Some(Version::MIN));
        assert_eq!(version_from_size(57), Some(Version::MAX));
        assert_eq!(version_from_size(22), None);
        assert_eq!(version_from_size(61), None);
        assert_eq!(version_from_size(0), None);
    }

    #[test]
    fn test_read_back_hello() {
        let code = Encoder::default().encode("HELLO").unwrap();
        let decoded = read_back(&code).unwrap();
        assert_eq!(decoded.text(), Some("HELLO"));
        assert_eq!(decoded.version, Version::MIN);
        assert_eq!(decoded.ec_level, ECLevel::L);
        assert_eq!(decoded.mask_pattern, MaskPattern::Pattern0);
    }

    #[test]
    fn test_read_back_every_mask() {
        for mask in MaskPattern::ALL {
            let config = EncoderConfig::default().with_mask(MaskSelection::Fixed(mask));
            let code = Encoder::new(config).encode("https://example.com/a/b?c=d").unwrap();
            let decoded = read_back(&code).unwrap();
            assert_eq!(decoded.data, b"https://example.com/a/b?c=d", "{mask:?}");
            assert_eq!(decoded.mask_pattern, mask);
        }
    }

    #[test]
    fn test_deinterleave_inverts_interleave() {
        let version = Version::new(5).unwrap();
        let data: Vec<u8> = (0..62u8).collect();
        let codewords = add_ec_and_interleave(&data, version, ECLevel::Q);
        let out = deinterleave_and_check(&codewords, version, ECLevel::Q).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_corrupted_block_is_reported() {
        let version = Version::new(6).unwrap();
        let data = vec![0x33u8; 136];
        let mut codewords = add_ec_and_interleave(&data, version, ECLevel::L);
        // Index 1 is the first codeword of the second block
        codewords[1] ^= 0x01;
        assert_eq!(
            deinterleave_and_check(&codewords, version, ECLevel::L),
            Err(ReadbackError::Checksum { block: 1 })
        );
    }

    #[test]
    fn test_invalid_size() {
        let modules = BitMatrix::square(23);
        assert_eq!(read_matrix(&modules), Err(ReadbackError::InvalidSize(23)));
    }

    #[test]
    fn test_flipped_data_module_fails_checksum() {
        let code = Encoder::default().encode("checksum").unwrap();
        let mut modules = code.modules.clone();
        // Bottom-right corner is the first data bit
        modules.toggle(20, 20);
        assert!(matches!(
            read_matrix(&modules),
            Err(ReadbackError::Checksum { .. })
        ));
    }
}
