// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use cellgrid_index::{Aabb, SpatialIndex};
use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

fn gen_grid_rects(n: usize, cell: f64, scale: f64) -> Vec<Aabb> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb::from_xywh(x0, y0, cell * scale, cell * scale));
        }
    }
    out
}

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
}

fn gen_points(count: usize, extent: f64, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| (rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn populated(rects: &[Aabb], cell_size: f64) -> (SpatialIndex<usize>, Vec<Rc<usize>>) {
    let mut idx = SpatialIndex::with_cell_size(cell_size).unwrap();
    let entries: Vec<Rc<usize>> = (0..rects.len()).map(Rc::new).collect();
    for (e, r) in entries.iter().zip(rects) {
        idx.insert(e, *r).unwrap();
    }
    (idx, entries)
}

const CELL_SIZES: [f64; 3] = [16.0, 64.0, 256.0];

fn bench_insert(c: &mut Criterion, name: &str, scale: f64) {
    let mut group = c.benchmark_group(name);
    for &n in &[32usize, 64] {
        let rects = gen_grid_rects(n, 10.0, scale);
        let entries: Vec<Rc<usize>> = (0..rects.len()).map(Rc::new).collect();
        group.throughput(Throughput::Elements(rects.len() as u64));
        for cell_size in CELL_SIZES {
            group.bench_function(BenchmarkId::new(format!("cell{cell_size}"), n), |b| {
                b.iter_batched(
                    || SpatialIndex::<usize>::with_cell_size(cell_size).unwrap(),
                    |mut idx| {
                        for (e, r) in entries.iter().zip(&rects) {
                            idx.insert(e, *r).unwrap();
                        }
                        idx
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_insert_grid(c: &mut Criterion) {
    bench_insert(c, "insert_grid", 1.0);
}

fn bench_insert_overlap(c: &mut Criterion) {
    bench_insert(c, "insert_overlap", 3.0);
}

fn bench_query_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_point");
    for &n in &[32usize, 64] {
        let rects = gen_grid_rects(n, 10.0, 2.0);
        let points = gen_points(1024, n as f64 * 10.0, 0x9E37_79B9);
        group.throughput(Throughput::Elements(points.len() as u64));
        for cell_size in CELL_SIZES {
            let (idx, _alive) = populated(&rects, cell_size);
            group.bench_function(BenchmarkId::new(format!("cell{cell_size}"), n), |b| {
                b.iter(|| {
                    let mut total = 0usize;
                    for &(x, y) in &points {
                        total += idx.query_point(x, y).len();
                    }
                    black_box(total)
                });
            });
        }
    }
    group.finish();
}

fn bench_visit_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit_rect");
    for &n in &[32usize, 64] {
        let rects = gen_grid_rects(n, 10.0, 1.0);
        let extent = n as f64 * 10.0;
        let mut rng = Rng::new(42);
        let queries: Vec<Aabb> = (0..256)
            .map(|_| {
                let x = rng.next_f64() * extent;
                let y = rng.next_f64() * extent;
                Aabb::from_xywh(x, y, 5.0 + rng.next_f64() * 60.0, 5.0 + rng.next_f64() * 60.0)
            })
            .collect();
        group.throughput(Throughput::Elements(queries.len() as u64));
        for cell_size in CELL_SIZES {
            let (idx, _alive) = populated(&rects, cell_size);
            group.bench_function(BenchmarkId::new(format!("cell{cell_size}"), n), |b| {
                b.iter(|| {
                    let mut total = 0usize;
                    for q in &queries {
                        idx.visit_overlapping(*q, |_, _| total += 1);
                    }
                    black_box(total)
                });
            });
        }
    }
    group.finish();
}

fn bench_update_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_heavy");
    let rects = gen_grid_rects(64, 10.0, 1.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    for cell_size in CELL_SIZES {
        group.bench_function(BenchmarkId::from_parameter(cell_size), |b| {
            b.iter_batched(
                || populated(&rects, cell_size),
                |(mut idx, entries)| {
                    for (j, (e, r)) in entries.iter().zip(&rects).enumerate() {
                        let dx = (j % 5) as f64 * 4.0 - 8.0;
                        let dy = ((j * 7) % 5) as f64 * 4.0 - 8.0;
                        idx.update(e, *r, r.translate(dx, dy)).unwrap();
                    }
                    (idx, entries)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_grid,
    bench_insert_overlap,
    bench_query_point,
    bench_visit_rect,
    bench_update_heavy,
);
criterion_main!(benches);
