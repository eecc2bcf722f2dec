//! GF(256) arithmetic with the QR primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11d)

use std::sync::OnceLock;

const PRIMITIVE: u16 = 0x11d;

struct Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> Tables {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut val: u16 = 1;
    for i in 0..255 {
        exp[i] = val as u8;
        log[val as usize] = i as u8;
        val <<= 1;
        if val >= 256 {
            val ^= PRIMITIVE;
        }
    }
    exp[255] = exp[0];
    Tables { exp, log }
}

/// GF(256) field operations using log/exp tables
pub struct Gf256;

impl Gf256 {
    /// alpha^n, with n reduced mod 255
    pub fn exp(n: usize) -> u8 {
        tables().exp[n % 255]
    }

    /// Multiplication via log/exp lookup
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let t = tables();
        let log_a = t.log[a as usize] as usize;
        let log_b = t.log[b as usize] as usize;
        t.exp[(log_a + log_b) % 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Carry-less multiply reduced by 0x11d, bit by bit
    fn slow_mul(mut a: u8, mut b: u8) -> u8 {
        let mut product = 0u8;
        while b != 0 {
            if b & 1 != 0 {
                product ^= a;
            }
            let carry = a & 0x80 != 0;
            a <<= 1;
            if carry {
                a ^= (PRIMITIVE & 0xff) as u8;
            }
            b >>= 1;
        }
        product
    }

    #[test]
    fn test_exp_table_prefix() {
        let expected = [1u8, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135, 19, 38];
        for (i, &e) in expected.iter().enumerate() {
            assert_eq!(Gf256::exp(i), e);
        }
        assert_eq!(Gf256::exp(255), 1);
        assert_eq!(tables().exp[255], tables().exp[0]);
    }

    #[test]
    fn test_exp_generates_all_nonzero_elements() {
        let mut seen = [false; 256];
        for i in 0..255 {
            seen[Gf256::exp(i) as usize] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_log_inverts_exp() {
        for a in 1..=255u8 {
            let l = tables().log[a as usize] as usize;
            assert_eq!(Gf256::exp(l), a);
        }
    }

    #[test]
    fn test_mul_matches_carryless_multiply() {
        for a in 0..=255u8 {
            for b in [0u8, 1, 2, 3, 29, 87, 128, 200, 255] {
                assert_eq!(Gf256::mul(a, b), slow_mul(a, b), "{a} * {b}");
            }
        }
    }
}
