/// Reed-Solomon encoding for QR codes.
///
/// Polynomials are stored highest degree first, matching codeword order:
/// `c[0]` is the coefficient of x^(n-1).
use super::gf256::Gf256;

/// Generator polynomial `(x - a^0)(x - a^1)...(x - a^(degree-1))`.
///
/// Monic, `degree + 1` coefficients.
pub fn generator_poly(degree: usize) -> Vec<u8> {
    let mut poly = vec![1u8];
    for i in 0..degree {
        let root = Gf256::exp(i);
        let mut next = vec![0u8; poly.len() + 1];
        for (j, &coeff) in poly.iter().enumerate() {
            next[j] ^= coeff;
            next[j + 1] ^= Gf256::mul(coeff, root);
        }
        poly = next;
    }
    poly
}

/// Remainder of `codeword` divided by a monic `generator`.
///
/// The result has `generator.len() - 1` coefficients.
pub fn poly_remainder(codeword: &[u8], generator: &[u8]) -> Vec<u8> {
    let degree = generator.len().saturating_sub(1);
    let mut work = codeword.to_vec();
    if work.len() < degree {
        let mut padded = vec![0u8; degree - work.len()];
        padded.extend_from_slice(&work);
        work = padded;
    }
    let steps = work.len() - degree;
    for i in 0..steps {
        let coef = work[i];
        if coef == 0 {
            continue;
        }
        for (j, &g) in generator.iter().enumerate() {
            work[i + j] ^= Gf256::mul(g, coef);
        }
    }
    work.split_off(steps)
}

/// Evaluate `codeword` at a^0 .. a^(ec_count-1). All zero for a valid codeword.
pub fn syndromes(codeword: &[u8], ec_count: usize) -> Vec<u8> {
    (0..ec_count)
        .map(|i| {
            let x = Gf256::exp(i);
            codeword
                .iter()
                .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
        })
        .collect()
}

/// Reed-Solomon encoder for a fixed number of EC codewords
pub struct ReedSolomonEncoder {
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Build the generator for `num_ecc_codewords` EC bytes
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self {
            generator: generator_poly(num_ecc_codewords),
        }
    }

    /// EC codewords produced per block
    pub fn ecc_len(&self) -> usize {
        self.generator.len() - 1
    }

    /// Generator coefficients, highest degree first
    pub fn generator(&self) -> &[u8] {
        &self.generator
    }

    /// EC codewords for `data`: the remainder of data * x^ecc_len by the generator
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let ecc_len = self.ecc_len();
        let mut msg = Vec::with_capacity(data.len() + ecc_len);
        msg.extend_from_slice(data);
        msg.resize(data.len() + ecc_len, 0);

        for i in 0..data.len() {
            let coef = msg[i];
            if coef == 0 {
                continue;
            }
            for (j, &g) in self.generator.iter().enumerate() {
                msg[i + j] ^= Gf256::mul(g, coef);
            }
        }

        msg.split_off(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_generator_degree_7() {
        assert_eq!(
            generator_poly(7),
            vec![1, 127, 122, 154, 164, 11, 68, 117]
        );
    }

    #[test]
    fn test_generator_roots() {
        let g = generator_poly(10);
        for i in 0..10 {
            let x = Gf256::exp(i);
            let value = g.iter().fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c);
            assert_eq!(value, 0, "a^{i} should be a root");
        }
    }

    #[test]
    fn test_hello_world_1m_vector() {
        // "HELLO WORLD" as a 1-M alphanumeric symbol
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let ecc = ReedSolomonEncoder::new(10).encode(&data);
        assert_eq!(ecc, vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]);
    }

    #[test]
    fn test_zero_data_gives_zero_ecc() {
        let ecc = ReedSolomonEncoder::new(7).encode(&[0u8; 19]);
        assert_eq!(ecc, vec![0u8; 7]);
    }

    #[test]
    fn test_random_codewords_divisible_by_generator() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0001);
        for _ in 0..200 {
            let k = rng.gen_range(1..=120);
            let ec_count = rng.gen_range(1..=30);
            let data: Vec<u8> = (0..k).map(|_| rng.r#gen()).collect();

            let rs = ReedSolomonEncoder::new(ec_count);
            let ecc = rs.encode(&data);
            assert_eq!(ecc.len(), ec_count);

            let mut codeword = data.clone();
            codeword.extend_from_slice(&ecc);
            assert!(poly_remainder(&codeword, rs.generator()).iter().all(|&b| b == 0));
            assert!(syndromes(&codeword, ec_count).iter().all(|&s| s == 0));
        }
    }

    #[test]
    fn test_corruption_breaks_syndromes() {
        let data = b"qrforge reed-solomon".to_vec();
        let rs = ReedSolomonEncoder::new(10);
        let mut codeword = data.clone();
        codeword.extend(rs.encode(&data));
        codeword[4] ^= 0x20;
        assert!(syndromes(&codeword, 10).iter().any(|&s| s != 0));
        assert!(poly_remainder(&codeword, rs.generator()).iter().any(|&b| b != 0));
    }
}
