//! Module grid construction: function patterns, reservations and data placement.
//!
//! Coordinates in this module are (row, col). The underlying [`BitMatrix`]
//! is addressed (x, y) = (col, row).

use super::format;
use super::tables::alignment_positions;
use super::version::{has_version_info, version_info_bits};
use crate::models::{BitMatrix, Version};

/// Module grid under construction for one symbol
#[derive(Debug, Clone)]
pub struct Layout {
    version: Version,
    modules: BitMatrix,
    reserved: BitMatrix,
}

impl Layout {
    /// Allocate the grid and place every function pattern and reservation
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut layout = Self {
            version,
            modules: BitMatrix::square(size),
            reserved: BitMatrix::square(size),
        };

        layout.place_finder(0, 0);
        layout.place_finder(0, size - 7);
        layout.place_finder(size - 7, 0);
        layout.place_timing();
        layout.place_alignments();
        layout.reserve_format_area();
        layout.set_function(size - 8, 8, true);
        if has_version_info(version) {
            layout.place_version_info();
        }

        layout
    }

    /// Modules per side
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Module grid, (x, y) = (col, row)
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Function-module map
    pub fn reserved(&self) -> &BitMatrix {
        &self.reserved
    }

    /// Split into (modules, reserved)
    pub fn into_parts(self) -> (BitMatrix, BitMatrix) {
        (self.modules, self.reserved)
    }

    /// Whether (row, col) holds a function module
    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.reserved.get(col, row)
    }

    fn set_function(&mut self, row: usize, col: usize, dark: bool) {
        self.modules.set(col, row, dark);
        self.reserved.set(col, row, true);
    }

    /// 7x7 finder with its top-left corner at (row, col), plus the light
    /// separator ring clipped to the grid
    fn place_finder(&mut self, row: usize, col: usize) {
        let size = self.size() as isize;
        for dr in -1isize..=7 {
            for dc in -1isize..=7 {
                let r = row as isize + dr;
                let c = col as isize + dc;
                if r < 0 || c < 0 || r >= size || c >= size {
                    continue;
                }
                let inside = (0..=6).contains(&dr) && (0..=6).contains(&dc);
                let dark = inside
                    && (dr == 0
                        || dr == 6
                        || dc == 0
                        || dc == 6
                        || ((2..=4).contains(&dr) && (2..=4).contains(&dc)));
                self.set_function(r as usize, c as usize, dark);
            }
        }
    }

    fn place_timing(&mut self) {
        let size = self.size();
        for i in 8..size - 8 {
            let dark = i % 2 == 0;
            self.set_function(6, i, dark);
            self.set_function(i, 6, dark);
        }
    }

    fn place_alignments(&mut self) {
        let positions = alignment_positions(self.version);
        let size = self.size();
        for &row in positions {
            for &col in positions {
                // Skip the three finder corners
                let in_tl = row <= 8 && col <= 8;
                let in_tr = row <= 8 && col >= size - 9;
                let in_bl = row >= size - 9 && col <= 8;
                if in_tl || in_tr || in_bl {
                    continue;
                }
                self.place_alignment(row, col);
            }
        }
    }

    fn place_alignment(&mut self, row: usize, col: usize) {
        for dr in -2isize..=2 {
            for dc in -2isize..=2 {
                let dark = dr.abs().max(dc.abs()) != 1;
                let r = (row as isize + dr) as usize;
                let c = (col as isize + dc) as usize;
                self.set_function(r, c, dark);
            }
        }
    }

    /// Reserve both format info copies; values are written after masking
    fn reserve_format_area(&mut self) {
        let (first, second) = format::positions(self.size());
        for &(row, col) in first.iter().chain(second.iter()) {
            self.set_function(row, col, false);
        }
    }

    fn place_version_info(&mut self) {
        let size = self.size();
        let bits = version_info_bits(self.version);
        for i in 0..18 {
            let dark = (bits >> i) & 1 == 1;
            let a = size - 11 + i % 3;
            let b = i / 3;
            // Top-right block, then its transpose at the bottom-left
            self.set_function(b, a, dark);
            self.set_function(a, b, dark);
        }
    }

    /// Cells available for data, in placement order
    pub fn data_cells(&self) -> Vec<(usize, usize)> {
        data_module_order(&self.reserved)
    }

    /// Place codeword bits MSB first along the zig-zag. Returns bits placed.
    pub fn place_data(&mut self, codewords: &[u8]) -> usize {
        let total_bits = codewords.len() * 8;
        let cells = self.data_cells();
        let mut placed = 0;
        for (row, col) in cells.into_iter().take(total_bits) {
            let byte = codewords[placed / 8];
            let dark = (byte >> (7 - placed % 8)) & 1 == 1;
            self.modules.set(col, row, dark);
            placed += 1;
        }
        placed
    }
}

/// Non-reserved cells in QR placement order.
///
/// Column pairs are walked from the right edge, skipping the vertical timing
/// column, alternating upward and downward; the right column of each pair
/// comes first within a row.
pub fn data_module_order(reserved: &BitMatrix) -> Vec<(usize, usize)> {
    let dimension = reserved.width();
    let mut cells = Vec::with_capacity(dimension * dimension);
    let mut upward = true;
    let mut col = dimension as isize - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }
        let right = col as usize;
        let left = right - 1;

        let mut push_row = |row: usize| {
            for c in [right, left] {
                if !reserved.get(c, row) {
                    cells.push((row, c));
                }
            }
        };
        if upward {
            (0..dimension).rev().for_each(&mut push_row);
        } else {
            (0..dimension).for_each(&mut push_row);
        }

        upward = !upward;
        col -= 2;
    }

    cells
}
