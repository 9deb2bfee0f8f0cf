use std::ops::Deref;

use super::metadata::Color;
use crate::builder::QR;

// Masking pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match self.0 {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern"),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Tries all 8 masks against a copy of the symbol, applies the one with the
/// lowest penalty and returns it. Ties keep the lowest-numbered mask.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let best_mask = (0..8)
        .min_by_key(|&m| {
            let mut candidate = qr.clone();
            candidate.apply_mask(MaskPattern(m));
            penalty_score(&candidate)
        })
        .expect("Should return atleast 1 mask");
    let best_mask = MaskPattern(best_mask);
    qr.apply_mask(best_mask);
    best_mask
}

pub fn penalty_score(qr: &QR) -> u32 {
    score_runs(qr) + score_blocks(qr) + score_finder_patterns(qr) + score_balance(qr)
}

// Rule 1: runs of 5 or more same-colored modules in a row or column score 3,
// plus 1 for every module beyond the fifth
fn score_runs(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let mut score = 0;
    for i in 0..w {
        score += line_run_score((0..w).map(|j| *qr.get(i, j)));
        score += line_run_score((0..w).map(|j| *qr.get(j, i)));
    }
    score
}

fn line_run_score(line: impl Iterator<Item = Color>) -> u32 {
    let mut score = 0;
    let mut run_len = 0;
    let mut run_color = None;
    for color in line {
        if run_color != Some(color) {
            run_color = Some(color);
            run_len = 1;
            continue;
        }
        run_len += 1;
        if run_len == 5 {
            score += 3;
        } else if run_len > 5 {
            score += 1;
        }
    }
    score
}

// Rule 2: every same-colored 2x2 block scores 3, overlaps included
fn score_blocks(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let mut score = 0;
    for i in 0..w - 1 {
        for j in 0..w - 1 {
            let color = *qr.get(i, j);
            if color == *qr.get(i + 1, j)
                && color == *qr.get(i, j + 1)
                && color == *qr.get(i + 1, j + 1)
            {
                score += 3;
            }
        }
    }
    score
}

// Rule 3: every 1011101 run flanked by 4 light modules on either side, in any
// row or column, scores 40
fn score_finder_patterns(qr: &QR) -> u32 {
    static PATTERN: [Color; 11] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Light,
        Color::Light,
        Color::Light,
        Color::Light,
    ];

    let w = qr.width() as i16;
    let mut score = 0;
    for i in 0..w {
        for j in 0..=w - 11 {
            let fwd = (0..11).all(|k| *qr.get(i, j + k) == PATTERN[k as usize]);
            let rev = (0..11).all(|k| *qr.get(i, j + k) == PATTERN[(10 - k) as usize]);
            if fwd || rev {
                score += 40;
            }
            let fwd = (0..11).all(|k| *qr.get(j + k, i) == PATTERN[k as usize]);
            let rev = (0..11).all(|k| *qr.get(j + k, i) == PATTERN[(10 - k) as usize]);
            if fwd || rev {
                score += 40;
            }
        }
    }
    score
}

// Rule 4: deviation of the dark module ratio from 50%, in 5% steps
fn score_balance(qr: &QR) -> u32 {
    let w = qr.width();
    let total = (w * w) as f64;
    let dark = qr.count_dark_modules() as f64;

    let ratio = dark / total * 100.0;
    let next_multiple_of_5 = (ratio / 5.0).ceil() * 5.0;
    let prev_multiple_of_5 = (ratio / 5.0).floor() * 5.0;

    let diff1 = (50.0 - next_multiple_of_5).abs();
    let diff2 = (50.0 - prev_multiple_of_5).abs();

    (diff1.min(diff2) / 5.0) as u32 * 10
}
