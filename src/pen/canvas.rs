//! Braille pixel surface.
//!
//! Each terminal cell is one braille character holding a 2x4 block of dots:
//!
//! ```text
//!   1 4
//!   2 5
//!   3 6
//!   7 8
//! ```

use std::collections::BTreeMap;

const PIXEL_MAP: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];
const BRAILLE_OFFSET: u32 = 0x2800;

/// Dots are only kept within `[-DRAW_LIMIT, DRAW_LIMIT]` on both axes.
pub const DRAW_LIMIT: f64 = 4096.0;

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    // row -> column -> dot bits
    cells: BTreeMap<i64, BTreeMap<i64, u8>>,
}

fn in_bounds(x: f64, y: f64) -> bool {
    x.abs() <= DRAW_LIMIT && y.abs() <= DRAW_LIMIT
}

fn pixel(x: f64, y: f64) -> (i64, i64) {
    (x.round() as i64, y.round() as i64)
}

fn cell(x: i64, y: i64) -> (i64, i64) {
    (x.div_euclid(2), y.div_euclid(4))
}

fn dot(x: i64, y: i64) -> u8 {
    PIXEL_MAP[y.rem_euclid(4) as usize][x.rem_euclid(2) as usize]
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Points outside the drawable area are dropped.
    pub fn set(&mut self, x: f64, y: f64) {
        if !in_bounds(x, y) {
            return;
        }
        let (x, y) = pixel(x, y);
        let (col, row) = cell(x, y);
        *self.cells.entry(row).or_default().entry(col).or_default() |= dot(x, y);
    }

    pub fn get(&self, x: f64, y: f64) -> bool {
        if !in_bounds(x, y) {
            return false;
        }
        let (x, y) = pixel(x, y);
        let (col, row) = cell(x, y);
        self.cells
            .get(&row)
            .and_then(|cols| cols.get(&col))
            .map_or(false, |bits| bits & dot(x, y) != 0)
    }

    /// Renders the bounding box of everything set. Rows start at the leftmost
    /// column in use and end at their own last cell, so there is no trailing padding.
    pub fn frame(&self) -> String {
        let (Some(min_row), Some(max_row)) = (
            self.cells.keys().next().copied(),
            self.cells.keys().next_back().copied(),
        ) else {
            return String::new();
        };
        let min_col = self
            .cells
            .values()
            .filter_map(|cols| cols.keys().next().copied())
            .min()
            .unwrap_or(0);

        let mut rows = Vec::new();
        for row in min_row..=max_row {
            let Some(cols) = self.cells.get(&row) else {
                rows.push(String::new());
                continue;
            };
            let max_col = cols.keys().next_back().copied().unwrap_or(min_col);
            let line: String = (min_col..=max_col)
                .map(|col| braille(cols.get(&col).copied().unwrap_or(0)))
                .collect();
            rows.push(line);
        }
        rows.join("\n")
    }
}

fn braille(bits: u8) -> char {
    char::from_u32(BRAILLE_OFFSET + u32::from(bits)).unwrap_or(' ')
}

/// Pixel coordinates along the segment from `(x1, y1)` to `(x2, y2)`, both ends
/// included, after clipping it to the drawable area. A zero-length segment yields nothing.
pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<(f64, f64)> {
    let Some((x1, y1, x2, y2)) = clip(x1, y1, x2, y2) else {
        return Vec::new();
    };
    let (x1, y1) = pixel(x1, y1);
    let (x2, y2) = pixel(x2, y2);
    let xdiff = (x2 - x1).abs();
    let ydiff = (y2 - y1).abs();
    if xdiff == 0 && ydiff == 0 {
        return Vec::new();
    }
    let steps = xdiff.max(ydiff);
    let dx = (x2 - x1) as f64 / steps as f64;
    let dy = (y2 - y1) as f64 / steps as f64;
    (0..=steps)
        .map(|i| (x1 as f64 + i as f64 * dx, y1 as f64 + i as f64 * dy))
        .collect()
}

// Liang-Barsky against the square of side 2 * DRAW_LIMIT.
fn clip(x1: f64, y1: f64, x2: f64, y2: f64) -> Option<(f64, f64, f64, f64)> {
    let (dx, dy) = (x2 - x1, y2 - y1);
    if ![x1, y1, x2, y2, dx, dy].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-dx, x1 + DRAW_LIMIT),
        (dx, DRAW_LIMIT - x1),
        (-dy, y1 + DRAW_LIMIT),
        (dy, DRAW_LIMIT - y1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((x1 + t0 * dx, y1 + t0 * dy, x1 + t1 * dx, y1 + t1 * dy))
}
