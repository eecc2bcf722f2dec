/// Version selection and version information for QR codes v7+
use super::tables::byte_capacity;
use crate::error::EncodeError;
use crate::models::{ECLevel, Version};

// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1f25;

/// Smallest version in `min..=max` whose byte capacity holds `len` bytes.
pub fn select_version(
    len: usize,
    ec_level: ECLevel,
    min: Version,
    max: Version,
) -> Result<Version, EncodeError> {
    if min > max {
        return Err(EncodeError::VersionRange {
            min: min.number(),
            max: max.number(),
        });
    }
    min.range_to(max)
        .find(|&v| byte_capacity(v, ec_level) >= len)
        .ok_or(EncodeError::DataTooLong {
            len,
            max: byte_capacity(max, ec_level),
        })
}

/// 18-bit version information: 6-bit version followed by 12 BCH bits.
///
/// Only meaningful for versions 7 and above.
pub fn version_info_bits(version: Version) -> u32 {
    let data = version.number() as u32;
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    (data << 12) | (rem & 0xfff)
}

/// Versions 7+ carry two version info blocks
pub fn has_version_info(version: Version) -> bool {
    version.number() >= 7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_select_smallest_fitting_version() {
        let select = |len| select_version(len, ECLevel::L, Version::MIN, Version::MAX);
        assert_eq!(select(0), Ok(v(1)));
        assert_eq!(select(17), Ok(v(1)));
        assert_eq!(select(18), Ok(v(2)));
        assert_eq!(select(32), Ok(v(2)));
        assert_eq!(select(33), Ok(v(3)));
        assert_eq!(select(230), Ok(v(9)));
        assert_eq!(select(231), Ok(v(10)));
        assert_eq!(select(271), Ok(v(10)));
    }

    #[test]
    fn test_select_overflow() {
        assert_eq!(
            select_version(272, ECLevel::L, Version::MIN, Version::MAX),
            Err(EncodeError::DataTooLong { len: 272, max: 271 })
        );
        assert_eq!(
            select_version(120, ECLevel::H, Version::MIN, Version::MAX),
            Err(EncodeError::DataTooLong { len: 120, max: 119 })
        );
    }

    #[test]
    fn test_select_respects_bounds() {
        assert_eq!(select_version(1, ECLevel::L, v(4), Version::MAX), Ok(v(4)));
        assert_eq!(
            select_version(40, ECLevel::L, Version::MIN, v(2)),
            Err(EncodeError::DataTooLong { len: 40, max: 32 })
        );
        assert_eq!(
            select_version(1, ECLevel::L, v(5), v(3)),
            Err(EncodeError::VersionRange { min: 5, max: 3 })
        );
    }

    #[test]
    fn test_version_info_known_values() {
        assert_eq!(version_info_bits(v(7)), 0x07C94);
        assert_eq!(version_info_bits(v(8)), 0x085BC);
        assert_eq!(version_info_bits(v(9)), 0x09A99);
        assert_eq!(version_info_bits(v(10)), 0x0A4D3);
    }

    #[test]
    fn test_has_version_info() {
        assert!(!has_version_info(v(6)));
        assert!(has_version_info(v(7)));
    }
}
