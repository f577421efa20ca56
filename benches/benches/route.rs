// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use cellgrid_index::Aabb;
use cellgrid_router::{Bounded, EventClass, EventRouter, PointerInput, PointerTarget};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};

struct Counter {
    aabb: Aabb,
    hits: Cell<u64>,
}

impl Bounded for Counter {
    fn aabb(&self) -> Aabb {
        self.aabb
    }
}

impl PointerTarget<()> for Counter {
    type Error = Infallible;
    fn on_press(&self, _: &PointerInput<'_, ()>) -> Result<(), Infallible> {
        self.hits.set(self.hits.get() + 1);
        Ok(())
    }
    fn on_motion(&self, _: &PointerInput<'_, ()>) -> Result<(), Infallible> {
        self.hits.set(self.hits.get() + 1);
        Ok(())
    }
}

fn widgets(n: usize) -> Vec<Rc<Counter>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Rc::new(Counter {
                aabb: Aabb::from_xywh(x as f64 * 40.0, y as f64 * 24.0, 36.0, 20.0),
                hits: Cell::new(0),
            }));
        }
    }
    out
}

fn bench_motion_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_motion_sweep");
    for &n in &[16usize, 48] {
        let ws = widgets(n);
        let mut router = EventRouter::with_cell_size(64.0).unwrap();
        for w in &ws {
            router.register(w).unwrap();
        }
        let steps: Vec<Point> = (0..512)
            .map(|i| {
                let t = i as f64 / 512.0;
                Point::new(t * n as f64 * 40.0, t * n as f64 * 24.0)
            })
            .collect();
        group.throughput(Throughput::Elements(steps.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(n * n), |b| {
            b.iter(|| {
                let mut delivered = 0;
                for p in &steps {
                    delivered += router.route(EventClass::Motion, *p, &()).delivered;
                }
                black_box(delivered)
            });
        });
    }
    group.finish();
}

fn bench_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_click");
    for &n in &[16usize, 48] {
        let ws = widgets(n);
        let mut router = EventRouter::with_cell_size(64.0).unwrap();
        for w in &ws {
            router.register(w).unwrap();
        }
        group.bench_function(BenchmarkId::from_parameter(n * n), |b| {
            b.iter(|| {
                let p = Point::new(58.0, 34.0);
                router.route(EventClass::Press, p, &());
                router.route(EventClass::Drag, p + Vec2::new(5.0, 5.0), &());
                black_box(router.route(EventClass::Release, p, &()).delivered)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_motion_sweep, bench_click);
criterion_main!(benches);
