// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cellgrid_index --heading-base-level=0

//! Cellgrid Index: a uniform-grid spatial index over weakly held entries.
//!
//! ## Overview
//!
//! The index maps axis-aligned boxes to square grid cells and answers proximity and overlap
//! queries by looking only at the cells a query touches.
//!
//! - [`CellHasher`]: maps a coordinate to a [`CellCoord`] by floored division.
//! - [`SpatialIndex`]: buckets of entry ids per cell, with insert, remove, and move.
//! - Overlap queries ([`SpatialIndex::query`], [`SpatialIndex::visit_overlapping`]): union of
//!   the touched buckets, each entry reported once, filtered by a strict [`Aabb::overlaps`] test.
//!
//! ## Membership
//!
//! Entries are owned elsewhere and shared as `Rc<T>`. The index stores a `Weak<T>` behind a
//! generational [`EntryId`], so a dropped entry disappears from every query on the next read,
//! and a stale id never resolves to a different entry. The leftover bookkeeping is reaped
//! as the index grows, per cell with [`SpatialIndex::reap_cell`], or all at once with
//! [`SpatialIndex::purge`].
//!
//! An entry whose box spans several cells is registered in all of them. The cost of insert
//! and remove is proportional to that cell count, which is why [`GridConfig`] exposes the
//! cell size as the one tuning knob.
//!
//! ## Overlap rule
//!
//! Boxes overlap only when their interiors intersect. Boxes that share an edge or a corner
//! do not overlap, and a point query on an entry's border does not hit it.
//!
//! ```rust
//! use std::rc::Rc;
//! use cellgrid_index::{Aabb, CellCoord, SpatialIndex};
//!
//! let mut index = SpatialIndex::with_cell_size(64.0).unwrap();
//! let left = Rc::new("left");
//! let right = Rc::new("right");
//! let l = index.insert(&left, Aabb::new(0.0, 0.0, 10.0, 10.0)).unwrap();
//! index.insert(&right, Aabb::new(10.0, 0.0, 20.0, 10.0)).unwrap();
//!
//! // Both sit in cell (0, 0), but only `left` contains the point.
//! assert_eq!(index.bucket(CellCoord::new(0, 0)).count(), 2);
//! let hits = index.query_point(5.0, 5.0);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].0, l);
//!
//! // Shared edge: no overlap.
//! assert!(index.query_point(10.0, 5.0).is_empty());
//! ```
//!
//! ## Features
//!
//! - `kurbo`: conversions between [`Aabb`] and `kurbo::Rect`/`kurbo::Point`.
//!
//! The index is single-threaded: `Rc` membership makes it `!Send`. Embedders that need
//! shared access should wrap the whole index in one lock.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod grid;
mod hash;
mod query;
mod types;

pub use config::GridConfig;
pub use error::IndexError;
pub use grid::SpatialIndex;
pub use hash::CellHasher;
pub use types::{Aabb, CellCoord, CellRange, EntryId};
