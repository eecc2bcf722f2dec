/// Compact bit matrix for storing module grids
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions, all bits cleared
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Create a square matrix of `size` x `size` modules
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-bounds reads are light
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let bit = 1 << (index % 8);
        if value {
            self.data[index / 8] |= bit;
        } else {
            self.data[index / 8] &= !bit;
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        self.data[index / 8] ^= 1 << (index % 8);
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        // Bits past width * height are never set, so whole bytes can be counted.
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));

        matrix.toggle(3, 4);
        assert!(!matrix.get(3, 4));

        matrix.set(1, 1, true);
        matrix.clear();
        assert!(!matrix.get(1, 1));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::square(21);
        matrix.set(21, 21, true);
        matrix.toggle(30, 0);
        assert!(!matrix.get(21, 21));
        assert_eq!(matrix.count_ones(), 0);
    }

    #[test]
    fn test_count_ones_non_byte_aligned() {
        let mut matrix = BitMatrix::square(21);
        matrix.set(20, 20, true);
        matrix.set(0, 0, true);
        matrix.set(7, 3, true);
        assert_eq!(matrix.count_ones(), 3);
    }
}
