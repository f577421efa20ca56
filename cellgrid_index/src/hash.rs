// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate-to-cell hashing.
//!
//! Cells are half-open squares `[i * size, (i + 1) * size)` on each axis. Division is
//! floored, so every cell has the same width on both sides of the origin: `-0.5` lands in
//! cell `-1`, not `0`.

use crate::config::GridConfig;
use crate::types::{Aabb, CellCoord, CellRange};

/// Maps continuous coordinates to integer cell coordinates for a fixed cell size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellHasher {
    cell_size: f64,
}

impl CellHasher {
    /// Create a hasher for an already validated configuration.
    pub const fn new(config: GridConfig) -> Self {
        Self {
            cell_size: config.cell_size(),
        }
    }

    /// Side length of a cell.
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell containing `(x, y)`.
    #[inline]
    pub fn cell(&self, x: f64, y: f64) -> CellCoord {
        CellCoord::new(self.axis(x), self.axis(y))
    }

    /// Inclusive cell range covering `aabb`.
    ///
    /// Ends saturate at the `i32` limits, so a box far larger than the cell size yields a
    /// range of billions of cells rather than an error. Check [`CellRange::len`] before
    /// walking a range built from untrusted geometry.
    #[inline]
    pub fn range(&self, aabb: &Aabb) -> CellRange {
        CellRange {
            min: self.cell(aabb.left, aabb.bottom),
            max: self.cell(aabb.right, aabb.top),
        }
    }

    #[inline]
    fn axis(&self, v: f64) -> i32 {
        floor_to_i32(v / self.cell_size)
    }
}

/// `floor` without `std`/`libm`: truncate, then step down for negative fractions.
///
/// Out-of-range values saturate at the `i32` limits and NaN maps to `0`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int `as` saturates, which is the intended clamping"
)]
fn floor_to_i32(q: f64) -> i32 {
    let t = q as i32;
    if f64::from(t) > q {
        t.saturating_sub(1)
    } else {
        t
    }
}
