// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use planes_tree::{Plane, PlaneId, Tree};

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

/// `n` overlapping siblings, each with a nested child, scattered over a 1000×1000 root.
fn gen_scatter(n: usize, seed: u64) -> (Tree, PlaneId) {
    let mut rng = Rng::new(seed);
    let mut tree = Tree::new();
    let root = tree.insert_detached(Plane::new("root", Rect::new(0.0, 0.0, 1000.0, 1000.0)));
    for i in 0..n {
        let x = (rng.next_f64() * 950.0).floor();
        let y = (rng.next_f64() * 950.0).floor();
        let p = tree
            .insert(Some(root), Plane::new(format!("p{i}"), Rect::new(x, y, x + 50.0, y + 50.0)))
            .unwrap();
        tree.insert(Some(p), Plane::new("inner", Rect::new(10.0, 10.0, 40.0, 40.0)))
            .unwrap();
    }
    (tree, root)
}

fn bench_plane_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("plane_at");
    for &n in &[100usize, 1_000] {
        let (tree, root) = gen_scatter(n, 0x5eed);
        let mut rng = Rng::new(7);
        let points: Vec<Point> = (0..256)
            .map(|_| Point::new(rng.next_f64() * 1000.0, rng.next_f64() * 1000.0))
            .collect();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("scatter_n{}", n), |b| {
            b.iter(|| {
                for &p in &points {
                    black_box(tree.plane_at(root, p));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_plane_at);
criterion_main!(benches);
