// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid with weak, generational entry membership.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::fmt::{self, Debug};

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::config::GridConfig;
use crate::error::IndexError;
use crate::hash::CellHasher;
use crate::types::{Aabb, CellCoord, CellRange, EntryId};

/// Slot count below which inserts never trigger a purge.
const MIN_REAP_THRESHOLD: usize = 64;

/// Ids registered under one cell. Kept free of duplicates.
pub(crate) type Bucket = SmallVec<[EntryId; 4]>;

/// What the index remembers about a registered entry.
pub(crate) struct Record<T> {
    pub(crate) entry: Weak<T>,
    pub(crate) aabb: Aabb,
    pub(crate) range: CellRange,
}

struct Slot<T> {
    generation: u32,
    record: Option<Record<T>>,
}

/// Uniform-grid spatial index over externally owned entries.
///
/// Entries are shared as [`Rc<T>`]; the index only keeps a [`Weak<T>`], so registering an
/// entry never extends its lifetime. Once the last strong owner drops an entry, no read
/// operation returns it again. Its bookkeeping is reaped lazily:
///
/// - an insert that would grow the slot table first purges dropped entries, with the
///   threshold doubling each time so the cost stays amortized;
/// - [`reap_cell`](Self::reap_cell) reaps the dropped entries of one cell, which is what a
///   router does under the pointer after each event;
/// - [`purge`](Self::purge) and [`remove_id`](Self::remove_id) reap explicitly.
///
/// Correctness of reads does not depend on when reaping happens.
///
/// An entry with box `(l, b, r, t)` is registered in every cell from `cell(l, b)` to
/// `cell(r, t)` inclusive and nowhere else. The index records each entry's last box, so
/// removal and moves always clear exactly the cells the entry occupies.
///
/// ```
/// use std::rc::Rc;
/// use cellgrid_index::{Aabb, SpatialIndex};
///
/// let mut index = SpatialIndex::with_cell_size(64.0).unwrap();
/// let button = Rc::new("ok");
/// index.insert(&button, Aabb::new(0.0, 0.0, 130.0, 10.0)).unwrap();
///
/// let hits = index.query_point(100.0, 5.0);
/// assert_eq!(hits.len(), 1);
///
/// drop(button);
/// assert!(index.query_point(100.0, 5.0).is_empty());
/// assert_eq!(index.purge(), 1);
/// ```
pub struct SpatialIndex<T> {
    pub(crate) hasher: CellHasher,
    pub(crate) buckets: HashMap<CellCoord, Bucket>,
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    by_ptr: HashMap<*const T, EntryId>,
    reap_threshold: usize,
}

impl<T> Debug for SpatialIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("cell_size", &self.hasher.cell_size())
            .field("entries", &self.len())
            .field("buckets", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl<T> SpatialIndex<T> {
    /// Create an empty index.
    pub fn new(config: GridConfig) -> Self {
        Self {
            hasher: CellHasher::new(config),
            buckets: HashMap::new(),
            slots: Vec::new(),
            free_list: Vec::new(),
            by_ptr: HashMap::new(),
            reap_threshold: MIN_REAP_THRESHOLD,
        }
    }

    /// Create an empty index, validating `cell_size`.
    pub fn with_cell_size(cell_size: f64) -> Result<Self, IndexError> {
        GridConfig::new(cell_size).map(Self::new)
    }

    /// The hasher used to map coordinates to cells.
    pub fn hasher(&self) -> &CellHasher {
        &self.hasher
    }

    /// Side length of a cell.
    pub fn cell_size(&self) -> f64 {
        self.hasher.cell_size()
    }

    /// Number of registered entries, including dropped entries not yet purged.
    pub fn len(&self) -> usize {
        self.by_ptr.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_ptr.is_empty()
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Register `entry` with box `aabb` and return its id.
    ///
    /// Inserting an entry that is already registered with the same box is a no-op and
    /// returns the existing id. Inserting it with a different box moves it, exactly like
    /// [`set_aabb`](Self::set_aabb).
    ///
    /// The entry is linked into every cell its box covers, so the cost grows with
    /// `(width / cell_size) * (height / cell_size)`. Cell coordinates saturate at the `i32`
    /// limits rather than failing: a box billions of cells wide is accepted and takes
    /// billions of bucket insertions. Keep boxes within a sensible multiple of the cell size.
    pub fn insert(&mut self, entry: &Rc<T>, aabb: Aabb) -> Result<EntryId, IndexError> {
        ensure_valid(aabb)?;
        if let Some(id) = self.lookup(entry) {
            self.relink(id, aabb);
            return Ok(id);
        }

        if self.free_list.is_empty() && self.slots.len() >= self.reap_threshold {
            self.purge();
            self.reap_threshold = (self.len() * 2).max(MIN_REAP_THRESHOLD);
        }

        let range = self.hasher.range(&aabb);
        let record = Record {
            entry: Rc::downgrade(entry),
            aabb,
            range,
        };
        let id = self.alloc(record);
        self.by_ptr.insert(Rc::as_ptr(entry), id);
        self.link(id, range);
        tracing::trace!(id = %id, cells = range.len(), "inserted entry");
        Ok(id)
    }

    /// Unregister `entry`, returning the box it was registered with.
    ///
    /// The entry is removed from every cell of its recorded box. Fails with
    /// [`IndexError::NotRegistered`] if it is not registered, so a double removal is
    /// reported rather than fatal.
    pub fn remove(&mut self, entry: &Rc<T>) -> Result<Aabb, IndexError> {
        let id = self
            .lookup(entry)
            .ok_or(IndexError::NotRegistered { id: None })?;
        self.release(id)
    }

    /// Unregister by id. Works for entries whose owner already dropped them.
    pub fn remove_id(&mut self, id: EntryId) -> Result<Aabb, IndexError> {
        if self.record(id).is_none() {
            return Err(IndexError::NotRegistered { id: Some(id) });
        }
        self.release(id)
    }

    /// Move `entry` from `old` to `new`.
    ///
    /// `old` must describe where the entry is registered: if any cell covered by `old`
    /// does not hold the entry, this fails with [`IndexError::NotRegistered`] and the index
    /// is left untouched. The entry is then cleared from all of its recorded cells and
    /// registered under `new` in the same call, so no reader can observe it half-moved.
    pub fn update(&mut self, entry: &Rc<T>, old: Aabb, new: Aabb) -> Result<(), IndexError> {
        ensure_valid(old)?;
        ensure_valid(new)?;
        let id = self
            .lookup(entry)
            .ok_or(IndexError::NotRegistered { id: None })?;

        let old_range = self.hasher.range(&old);
        let present = old_range.iter().all(|cell| self.bucket_contains(cell, id));
        if !present {
            tracing::warn!(id = %id, ?old, "update with a box the entry is not registered under");
            return Err(IndexError::NotRegistered { id: Some(id) });
        }
        self.relink(id, new);
        Ok(())
    }

    /// Move `entry` from its recorded box to `new`.
    pub fn set_aabb(&mut self, entry: &Rc<T>, new: Aabb) -> Result<(), IndexError> {
        ensure_valid(new)?;
        let id = self
            .lookup(entry)
            .ok_or(IndexError::NotRegistered { id: None })?;
        self.relink(id, new);
        Ok(())
    }

    /// Id of `entry`, if it is registered.
    pub fn id_of(&self, entry: &Rc<T>) -> Option<EntryId> {
        self.lookup(entry)
    }

    /// Returns `true` if `entry` is registered.
    pub fn contains(&self, entry: &Rc<T>) -> bool {
        self.lookup(entry).is_some()
    }

    /// Resolve an id to its entry.
    ///
    /// Returns `None` for stale ids and for entries whose owner has dropped them.
    pub fn get(&self, id: EntryId) -> Option<Rc<T>> {
        self.record(id).and_then(|r| r.entry.upgrade())
    }

    /// Recorded box of a registered entry.
    pub fn aabb_of(&self, id: EntryId) -> Option<Aabb> {
        self.record(id).map(|r| r.aabb)
    }

    /// Cells a registered entry occupies.
    pub fn cells_of(&self, id: EntryId) -> Option<CellRange> {
        self.record(id).map(|r| r.range)
    }

    /// Raw ids stored under `cell`, including entries that were dropped but not purged.
    ///
    /// Meant for inspection; use [`cells_at`](Self::cells_at) to get live entries.
    pub fn bucket(&self, cell: CellCoord) -> impl Iterator<Item = EntryId> + '_ {
        self.buckets.get(&cell).into_iter().flatten().copied()
    }

    /// Live entries registered under the cell containing `(x, y)`.
    ///
    /// This is the broad phase only: entries are not tested against the point itself.
    /// An empty cell yields nothing.
    pub fn cells_at(&self, x: f64, y: f64) -> impl Iterator<Item = (EntryId, Rc<T>)> + '_ {
        let cell = self.hasher.cell(x, y);
        self.bucket(cell)
            .filter_map(|id| self.get(id).map(|entry| (id, entry)))
    }

    /// Iterate live entries with their ids, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, Rc<T>)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let entry = slot.record.as_ref()?.entry.upgrade()?;
            let idx = u32::try_from(idx).ok()?;
            Some((EntryId::new(idx, slot.generation), entry))
        })
    }

    /// Reap entries whose owners have dropped them. Returns how many were reaped.
    pub fn purge(&mut self) -> usize {
        let dead: Vec<EntryId> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                let record = slot.record.as_ref()?;
                if record.entry.strong_count() > 0 {
                    return None;
                }
                Some(EntryId::new(u32::try_from(idx).ok()?, slot.generation))
            })
            .collect();
        let reaped = dead.into_iter().filter(|id| self.free(*id).is_some()).count();
        if reaped > 0 {
            tracing::debug!(reaped, "purged dropped entries");
        }
        reaped
    }

    /// Reap dropped entries registered under `cell` and return their ids.
    ///
    /// Each reaped entry is cleared from all of its cells, not just this one. Costs one
    /// scan of the bucket, the same as a query touching the cell.
    pub fn reap_cell(&mut self, cell: CellCoord) -> Vec<EntryId> {
        let mut dead: Vec<EntryId> = self
            .bucket(cell)
            .filter(|id| self.record(*id).is_some_and(|r| r.entry.strong_count() == 0))
            .collect();
        dead.retain(|id| self.free(*id).is_some());
        if !dead.is_empty() {
            tracing::trace!(%cell, reaped = dead.len(), "reaped dropped entries in cell");
        }
        dead
    }

    /// Remove every entry and bucket. Outstanding ids become stale.
    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.record.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                if let Ok(idx) = u32::try_from(idx) {
                    self.free_list.push(idx);
                }
            }
        }
        self.buckets.clear();
        self.by_ptr.clear();
    }

    pub(crate) fn record(&self, id: EntryId) -> Option<&Record<T>> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.record.as_ref()
    }

    fn bucket_contains(&self, cell: CellCoord, id: EntryId) -> bool {
        self.buckets.get(&cell).is_some_and(|b| b.contains(&id))
    }

    fn lookup(&self, entry: &Rc<T>) -> Option<EntryId> {
        let id = *self.by_ptr.get(&Rc::as_ptr(entry))?;
        // The stored `Weak` keeps the allocation reserved, so the address cannot have been
        // reused by a different `Rc` while the record exists.
        let record = self.record(id)?;
        core::ptr::eq(record.entry.as_ptr(), Rc::as_ptr(entry)).then_some(id)
    }

    fn alloc(&mut self, record: Record<T>) -> EntryId {
        if let Some(idx) = self.free_list.pop()
            && let Some(slot) = self.slots.get_mut(idx as usize)
        {
            slot.record = Some(record);
            return EntryId::new(idx, slot.generation);
        }
        let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 1,
            record: Some(record),
        });
        EntryId::new(idx, 1)
    }

    fn release(&mut self, id: EntryId) -> Result<Aabb, IndexError> {
        self.free(id).ok_or(IndexError::NotRegistered { id: Some(id) })
    }

    /// Free a live slot and clear its cells. `None` if `id` is stale.
    fn free(&mut self, id: EntryId) -> Option<Aabb> {
        let slot = self
            .slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.generation())?;
        let record = slot.record.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.0);
        self.by_ptr.remove(&record.entry.as_ptr());
        self.unlink(id, record.range);
        tracing::trace!(id = %id, "removed entry");
        Some(record.aabb)
    }

    /// Re-register a live entry under `aabb`, touching only cells that change.
    fn relink(&mut self, id: EntryId, aabb: Aabb) {
        let new_range = self.hasher.range(&aabb);
        let Some(record) = self
            .slots
            .get_mut(id.idx())
            .and_then(|s| s.record.as_mut())
        else {
            return;
        };
        let old_range = record.range;
        record.aabb = aabb;
        record.range = new_range;
        if old_range == new_range {
            return;
        }
        for cell in old_range.iter().filter(|c| !new_range.contains(*c)) {
            self.unlink_cell(cell, id);
        }
        for cell in new_range.iter().filter(|c| !old_range.contains(*c)) {
            self.link_cell(cell, id);
        }
    }

    fn link(&mut self, id: EntryId, range: CellRange) {
        for cell in range.iter() {
            self.link_cell(cell, id);
        }
    }

    fn unlink(&mut self, id: EntryId, range: CellRange) {
        for cell in range.iter() {
            self.unlink_cell(cell, id);
        }
    }

    fn link_cell(&mut self, cell: CellCoord, id: EntryId) {
        let bucket = self.buckets.entry(cell).or_default();
        if !bucket.contains(&id) {
            bucket.push(id);
        }
    }

    fn unlink_cell(&mut self, cell: CellCoord, id: EntryId) {
        debug_assert!(
            self.bucket_contains(cell, id),
            "entry {id} missing from cell {cell}"
        );
        let Some(bucket) = self.buckets.get_mut(&cell) else {
            return;
        };
        bucket.retain(|other| *other != id);
        if bucket.is_empty() {
            self.buckets.remove(&cell);
        }
    }
}

fn ensure_valid(aabb: Aabb) -> Result<(), IndexError> {
    if aabb.is_valid() {
        Ok(())
    } else {
        tracing::warn!(?aabb, "rejected invalid geometry");
        Err(IndexError::InvalidGeometry { aabb })
    }
}
