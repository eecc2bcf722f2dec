/// Data masking and mask penalty scoring
use super::format::FormatInfo;
use crate::models::{BitMatrix, ECLevel, MaskPattern};
use rayon::prelude::*;

const PENALTY_RUN: u32 = 3;
const PENALTY_BLOCK: u32 = 3;
const PENALTY_FINDER_LIKE: u32 = 40;
const PENALTY_BALANCE: u32 = 10;

const FINDER_LIKE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];

/// XOR the mask over every non-reserved module. Applying it twice undoes it.
pub fn apply_mask(modules: &mut BitMatrix, reserved: &BitMatrix, mask_pattern: MaskPattern) {
    let width = modules.width();
    let height = modules.height();

    for y in 0..height {
        for x in 0..width {
            if !reserved.get(x, y) && mask_pattern.is_masked(y, x) {
                modules.toggle(x, y);
            }
        }
    }
}

/// Penalty score of a finished symbol; lower scans better.
///
/// 1. Runs of 5+ same-colour modules in a row or column: 3 + (len - 5)
/// 2. Each 2x2 block of one colour: 3
/// 3. Each 1:1:3:1:1 finder-like pattern with 4 light modules on one side: 40
/// 4. Dark/light imbalance: 10 per full 5% away from 50%
pub fn penalty_score(modules: &BitMatrix) -> u32 {
    let size = modules.width();
    let row = move |y: usize| (0..size).map(move |x| modules.get(x, y));
    let col = move |x: usize| (0..size).map(move |y| modules.get(x, y));

    let mut penalty = 0u32;

    for i in 0..size {
        penalty += run_penalty(row(i));
        penalty += run_penalty(col(i));
    }

    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let color = modules.get(x, y);
            if color == modules.get(x + 1, y)
                && color == modules.get(x, y + 1)
                && color == modules.get(x + 1, y + 1)
            {
                penalty += PENALTY_BLOCK;
            }
        }
    }

    for i in 0..size {
        let r: Vec<bool> = row(i).collect();
        let c: Vec<bool> = col(i).collect();
        penalty += finder_like_count(&r) * PENALTY_FINDER_LIKE;
        penalty += finder_like_count(&c) * PENALTY_FINDER_LIKE;
    }

    penalty += balance_penalty(modules.count_ones(), size * size);

    penalty
}

/// 10 per full 5% the dark share sits away from 50%, on the exact ratio
fn balance_penalty(dark: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // |dark/total - 1/2| * 20 = |20 dark - 10 total| / total
    let steps = (dark * 20).abs_diff(total * 10) / total;
    steps as u32 * PENALTY_BALANCE
}

fn run_penalty(line: impl Iterator<Item = bool>) -> u32 {
    let mut penalty = 0u32;
    let mut run_color = None;
    let mut run_len = 0usize;

    let mut close_run = |len: usize| {
        if len >= 5 {
            penalty += PENALTY_RUN + (len - 5) as u32;
        }
    };

    for module in line {
        if Some(module) == run_color {
            run_len += 1;
        } else {
            close_run(run_len);
            run_color = Some(module);
            run_len = 1;
        }
    }
    close_run(run_len);

    penalty
}

fn finder_like_count(line: &[bool]) -> u32 {
    line.windows(FINDER_LIKE.len())
        .filter(|w| w.iter().eq(FINDER_LIKE.iter()) || w.iter().eq(FINDER_LIKE.iter().rev()))
        .count() as u32
}

/// Score every mask (with its format info in place) and return the lowest,
/// ties going to the lower pattern number, together with its masked grid.
///
/// Pattern 0 seeds the comparison; patterns 1-7 are scored in parallel.
pub fn select_mask(
    modules: &BitMatrix,
    reserved: &BitMatrix,
    ec_level: ECLevel,
) -> (MaskPattern, BitMatrix) {
    let score = |mask: MaskPattern| {
        let mut candidate = modules.clone();
        apply_mask(&mut candidate, reserved, mask);
        FormatInfo::new(ec_level, mask).place(&mut candidate);
        (penalty_score(&candidate), mask, candidate)
    };

    let seed = score(MaskPattern::Pattern0);
    let rest: Vec<(u32, MaskPattern, BitMatrix)> = MaskPattern::ALL[1..]
        .par_iter()
        .map(|&mask| score(mask))
        .collect();

    // `rest` is in ascending pattern order, so strict `<` keeps the lower pattern on ties
    let (_score, mask, candidate) = rest
        .into_iter()
        .fold(seed, |best, next| if next.0 < best.0 { next } else { best });
    (mask, candidate)
}
