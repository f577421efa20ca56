// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for `cellgrid_index`.
//!
//! These check the membership invariant, overlap symmetry, move atomicity, and disposal
//! over seeded random boxes, comparing the index against a brute-force scan.

use std::rc::Rc;

use cellgrid_index::{Aabb, CellCoord, EntryId, GridConfig, IndexError, SpatialIndex};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

fn random_box(rng: &mut Rng) -> Aabb {
    let x = rng.range(-500.0, 500.0);
    let y = rng.range(-500.0, 500.0);
    let w = rng.range(0.0, 150.0);
    let h = rng.range(0.0, 150.0);
    Aabb::from_xywh(x, y, w, h)
}

fn expected_cells(cell_size: f64, aabb: &Aabb) -> Vec<CellCoord> {
    let c = |v: f64| (v / cell_size).floor() as i32;
    let mut out = Vec::new();
    for i in c(aabb.left)..=c(aabb.right) {
        for j in c(aabb.bottom)..=c(aabb.top) {
            out.push(CellCoord::new(i, j));
        }
    }
    out
}

#[test]
fn entries_occupy_exactly_their_computed_cells() {
    let cell_size = 64.0;
    let mut index = SpatialIndex::new(GridConfig::new(cell_size).unwrap());
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let entries: Vec<(Rc<usize>, Aabb)> = (0..200)
        .map(|n| (Rc::new(n), random_box(&mut rng)))
        .collect();
    let ids: Vec<EntryId> = entries
        .iter()
        .map(|(e, aabb)| index.insert(e, *aabb).unwrap())
        .collect();

    for ((_, aabb), id) in entries.iter().zip(&ids) {
        let cells = expected_cells(cell_size, aabb);
        for cell in &cells {
            assert!(index.bucket(*cell).any(|x| x == *id), "{id} missing from {cell}");
        }
        // Nowhere else: total bucket appearances match the computed fan-out.
        let range = index.cells_of(*id).unwrap();
        assert_eq!(range.len(), cells.len());
        for cell in range.iter() {
            assert!(cells.contains(&cell));
        }
    }
}

#[test]
fn point_queries_match_brute_force() {
    let mut index = SpatialIndex::with_cell_size(50.0).unwrap();
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    let entries: Vec<(Rc<usize>, Aabb)> = (0..300)
        .map(|n| (Rc::new(n), random_box(&mut rng)))
        .collect();
    for (e, aabb) in &entries {
        index.insert(e, *aabb).unwrap();
    }

    for _ in 0..500 {
        let x = rng.range(-550.0, 700.0);
        let y = rng.range(-550.0, 700.0);
        let mut got: Vec<usize> = index.query_point(x, y).iter().map(|(_, e)| **e).collect();
        got.sort_unstable();
        let want: Vec<usize> = entries
            .iter()
            .filter(|(_, aabb)| aabb.contains_point(x, y))
            .map(|(e, _)| **e)
            .collect();
        assert_eq!(got, want, "point ({x}, {y})");
    }
}

#[test]
fn interior_points_always_hit_their_entry() {
    let mut index = SpatialIndex::with_cell_size(32.0).unwrap();
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    let mut alive = Vec::new();
    for n in 0..100 {
        let e = Rc::new(n);
        let mut aabb = random_box(&mut rng);
        aabb.right += 1.0;
        aabb.top += 1.0;
        let id = index.insert(&e, aabb).unwrap();
        for _ in 0..10 {
            let x = rng.range(aabb.left, aabb.right);
            let y = rng.range(aabb.bottom, aabb.top);
            if !aabb.contains_point(x, y) {
                continue;
            }
            assert!(index.query_point(x, y).iter().any(|(hit, _)| *hit == id));
        }
        alive.push(e);
    }
}

#[test]
fn rect_queries_match_brute_force_and_are_deduplicated() {
    let mut index = SpatialIndex::with_cell_size(40.0).unwrap();
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let entries: Vec<(Rc<usize>, Aabb)> = (0..250)
        .map(|n| (Rc::new(n), random_box(&mut rng)))
        .collect();
    for (e, aabb) in &entries {
        index.insert(e, *aabb).unwrap();
    }
    for _ in 0..100 {
        let q = random_box(&mut rng);
        let mut got: Vec<usize> = index.query(q).iter().map(|(_, e)| **e).collect();
        got.sort_unstable();
        let before = got.len();
        got.dedup();
        assert_eq!(before, got.len(), "duplicates for {q:?}");

        let want: Vec<usize> = entries
            .iter()
            .filter(|(_, aabb)| aabb.overlaps(&q))
            .map(|(e, _)| **e)
            .collect();
        assert_eq!(got, want);
    }
}

#[test]
fn overlap_is_symmetric_over_random_pairs() {
    let mut rng = Rng::new(7);
    for _ in 0..2000 {
        let a = random_box(&mut rng);
        let b = random_box(&mut rng);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    let b = Aabb::new(10.0, 0.0, 20.0, 10.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn update_moves_entry_between_cells() {
    let mut index = SpatialIndex::with_cell_size(10.0).unwrap();
    let e = Rc::new("mover");
    let old = Aabb::new(0.0, 0.0, 15.0, 5.0);
    let new = Aabb::new(12.0, 0.0, 35.0, 5.0);
    let id = index.insert(&e, old).unwrap();
    index.update(&e, old, new).unwrap();

    // (0, 0) is only covered by `old`; (1, 0) is covered by both.
    assert_eq!(index.bucket(CellCoord::new(0, 0)).count(), 0);
    for i in 1..=3 {
        assert!(index.bucket(CellCoord::new(i, 0)).any(|x| x == id));
    }
    assert!(index.query_point(5.0, 2.0).is_empty());
    assert_eq!(index.query_point(30.0, 2.0).len(), 1);
    assert_eq!(index.aabb_of(id), Some(new));
}

#[test]
fn update_of_unknown_entry_is_reported() {
    let mut index: SpatialIndex<&str> = SpatialIndex::default();
    let e = Rc::new("ghost");
    let a = Aabb::new(0.0, 0.0, 1.0, 1.0);
    assert_eq!(
        index.update(&e, a, a).unwrap_err(),
        IndexError::NotRegistered { id: None }
    );
}

#[test]
fn sequential_moves_leave_no_orphans() {
    let mut index = SpatialIndex::with_cell_size(16.0).unwrap();
    let mut rng = Rng::new(0x1234_5678);
    let e = Rc::new(0_u8);
    let mut at = random_box(&mut rng);
    let id = index.insert(&e, at).unwrap();
    for _ in 0..50 {
        let next = random_box(&mut rng);
        index.update(&e, at, next).unwrap();
        at = next;
    }
    let cells = index.cells_of(id).unwrap();
    assert_eq!(index.bucket_count(), cells.len());
}

#[test]
fn disposal_is_observed_without_explicit_removal() {
    let mut index = SpatialIndex::with_cell_size(10.0).unwrap();
    let keep = Rc::new(1);
    let gone = Rc::new(2);
    let aabb = Aabb::new(0.0, 0.0, 30.0, 30.0);
    let keep_id = index.insert(&keep, aabb).unwrap();
    let gone_id = index.insert(&gone, aabb).unwrap();
    drop(gone);

    let hits = index.query(aabb);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, keep_id);
    assert!(index.get(gone_id).is_none());
    assert_eq!(index.iter().count(), 1);

    assert_eq!(index.purge(), 1);
    assert_eq!(index.len(), 1);
    for cell in index.cells_of(keep_id).unwrap().iter() {
        assert_eq!(index.bucket(cell).collect::<Vec<_>>(), [keep_id]);
    }
    assert!(index.remove_id(gone_id).is_err());
}

#[test]
fn remove_id_reaps_dropped_entry() {
    let mut index = SpatialIndex::with_cell_size(10.0).unwrap();
    let e = Rc::new(());
    let id = index.insert(&e, Aabb::new(0.0, 0.0, 25.0, 25.0)).unwrap();
    drop(e);
    assert_eq!(index.remove_id(id).unwrap(), Aabb::new(0.0, 0.0, 25.0, 25.0));
    assert_eq!(index.bucket_count(), 0);
    assert!(index.iter().next().is_none());
}
