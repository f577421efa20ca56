// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap queries: broad phase over cells, then a strict box test.
//!
//! An entry spanning several cells sits in several buckets. Rather than collecting ids
//! into a set, each entry is reported only from the lowest cell shared by its own range
//! and the query range, which visits it exactly once without allocating.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::grid::SpatialIndex;
use crate::types::{Aabb, CellCoord, CellRange, EntryId};

impl<T> SpatialIndex<T> {
    /// Visit every live entry whose box strictly overlaps `aabb`.
    ///
    /// Each entry is visited once. Order is unspecified. An invalid query box matches
    /// nothing.
    pub fn visit_overlapping<F: FnMut(EntryId, &Rc<T>)>(&self, aabb: Aabb, mut f: F) {
        if !aabb.is_valid() {
            return;
        }
        let query = self.hasher.range(&aabb);
        let mut visit_cell = |cell: CellCoord, ids: &[EntryId]| {
            for &id in ids {
                let Some(record) = self.record(id) else {
                    continue;
                };
                if first_shared_cell(&record.range, &query) != cell
                    || !record.aabb.overlaps(&aabb)
                {
                    continue;
                }
                if let Some(entry) = record.entry.upgrade() {
                    f(id, &entry);
                }
            }
        };

        // Sparse grids: walking the occupied buckets is cheaper than walking a huge range.
        if query.len() > self.buckets.len() {
            for (cell, ids) in &self.buckets {
                if query.contains(*cell) {
                    visit_cell(*cell, ids.as_slice());
                }
            }
        } else {
            for cell in query.iter() {
                if let Some(ids) = self.buckets.get(&cell) {
                    visit_cell(cell, ids.as_slice());
                }
            }
        }
    }

    /// Live entries whose box strictly overlaps `aabb`, each reported once.
    pub fn query(&self, aabb: Aabb) -> Vec<(EntryId, Rc<T>)> {
        let mut out = Vec::new();
        self.visit_overlapping(aabb, |id, entry| out.push((id, Rc::clone(entry))));
        out
    }

    /// Live entries whose box strictly contains `(x, y)`.
    ///
    /// A point on an entry's border does not hit it.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<(EntryId, Rc<T>)> {
        self.query(Aabb::from_point(x, y))
    }
}

fn first_shared_cell(a: &CellRange, b: &CellRange) -> CellCoord {
    CellCoord::new(a.min.i.max(b.min.i), a.min.j.max(b.min.j))
}
