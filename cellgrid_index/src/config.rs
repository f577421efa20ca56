// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration for a grid.

use crate::error::IndexError;

/// Grid configuration.
///
/// The cell size is the only tunable. Pick it relative to the typical entry
/// size: an entry spanning `W x H` cells costs `O(W * H)` per insert and
/// remove, while cells much larger than entries make buckets crowded.
///
/// Cell coordinates are `i32` and saturate, so nothing rejects an oversized box: at
/// `cell_size` 1.0 the box `(-3e9, 0, 3e9, 1)` covers every column and an insert would touch
/// billions of buckets. Choose a cell size that keeps the widest expected box to a handful
/// of cells.
///
/// ```
/// use cellgrid_index::GridConfig;
///
/// assert_eq!(GridConfig::default().cell_size(), GridConfig::DEFAULT_CELL_SIZE);
/// assert!(GridConfig::new(64.0).is_ok());
/// assert!(GridConfig::new(0.0).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    cell_size: f64,
}

impl GridConfig {
    /// Cell size used by [`GridConfig::default`].
    pub const DEFAULT_CELL_SIZE: f64 = 128.0;

    /// Validate and build a configuration.
    ///
    /// Fails with [`IndexError::InvalidConfiguration`] unless `cell_size` is
    /// finite and strictly positive.
    pub fn new(cell_size: f64) -> Result<Self, IndexError> {
        if cell_size.is_finite() && cell_size > 0.0 {
            Ok(Self { cell_size })
        } else {
            Err(IndexError::InvalidConfiguration { cell_size })
        }
    }

    /// Side length of a grid cell.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
        }
    }
}
