// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the grid: boxes, cell coordinates, and entry handles.

use core::fmt;

/// Axis-aligned bounding box in a y-up coordinate space.
///
/// Fields follow the `(left, bottom, right, top)` convention. A box is
/// [valid](Aabb::is_valid) when `left <= right` and `bottom <= top`; the index
/// rejects anything else instead of normalizing it.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Aabb {
    /// Minimum x.
    pub left: f64,
    /// Minimum y.
    pub bottom: f64,
    /// Maximum x.
    pub right: f64,
    /// Maximum y.
    pub top: f64,
}

impl Aabb {
    /// Create a box from its four edges.
    #[inline]
    pub const fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Create a box from an origin and a size.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Degenerate box covering a single point.
    #[inline]
    pub const fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Returns `true` if `left <= right` and `bottom <= top`.
    ///
    /// NaN edges make a box invalid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.bottom <= self.top
    }

    /// Width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Strict overlap test.
    ///
    /// Boxes that only share an edge or a corner do not overlap. The test is
    /// symmetric.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top > other.bottom
            && self.bottom < other.top
    }

    /// Returns `true` if the point lies strictly inside the box.
    ///
    /// Equivalent to overlapping the degenerate box at `(x, y)`.
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.overlaps(&Self::from_point(x, y))
    }

    /// Translate the box by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.bottom + dy, self.right + dx, self.top + dy)
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Aabb {
    /// Kurbo rects are converted through [`kurbo::Rect::abs`], so the result is
    /// always valid for finite input.
    fn from(rect: kurbo::Rect) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

#[cfg(feature = "kurbo")]
impl From<Aabb> for kurbo::Rect {
    fn from(aabb: Aabb) -> Self {
        Self::new(aabb.left, aabb.bottom, aabb.right, aabb.top)
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Point> for Aabb {
    fn from(p: kurbo::Point) -> Self {
        Self::from_point(p.x, p.y)
    }
}

/// Integer coordinate of a grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Column.
    pub i: i32,
    /// Row.
    pub j: i32,
}

impl CellCoord {
    /// Create a cell coordinate.
    #[inline]
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((i, j): (i32, i32)) -> Self {
        Self::new(i, j)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Inclusive rectangle of cells covered by a box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Lowest cell on both axes.
    pub min: CellCoord,
    /// Highest cell on both axes (inclusive).
    pub max: CellCoord,
}

impl CellRange {
    /// Number of cells in the range.
    pub fn len(&self) -> usize {
        let w = u64::from(self.max.i.abs_diff(self.min.i)) + 1;
        let h = u64::from(self.max.j.abs_diff(self.min.j)) + 1;
        usize::try_from(w.saturating_mul(h)).unwrap_or(usize::MAX)
    }

    /// A range always covers at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `cell` is inside the range.
    pub fn contains(&self, cell: CellCoord) -> bool {
        (self.min.i..=self.max.i).contains(&cell.i) && (self.min.j..=self.max.j).contains(&cell.j)
    }

    /// Iterate the cells in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + use<> {
        let (min, max) = (self.min, self.max);
        (min.i..=max.i).flat_map(move |i| (min.j..=max.j).map(move |j| CellCoord::new(i, j)))
    }
}

/// Handle to an entry registered with a [`SpatialIndex`](crate::SpatialIndex).
///
/// This is a small, copyable handle made of a slot index and a generation
/// counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove (explicit, or reaping after the owner dropped the entry), the slot is freed
///   and every id that pointed to it becomes stale.
/// - On reuse of a freed slot its generation is incremented, so a stale id never aliases a
///   different live entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u32, pub(crate) u32);

impl EntryId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Generation of the slot this id was issued for.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({}v{})", self.0, self.1)
    }
}
