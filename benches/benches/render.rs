// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use planes_surface::Color;
use planes_tree::{Plane, PlaneId, Stats, Tree};

/// A board of `n`×`n` cells, each holding one card.
fn gen_board(n: usize, cell: f64) -> (Tree, PlaneId, Vec<PlaneId>) {
    let mut tree = Tree::new();
    let side = n as f64 * cell;
    let root = tree.insert_detached(Plane::new("board", Rect::new(0.0, 0.0, side, side)));
    let mut cards = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let (x0, y0) = (x as f64 * cell, y as f64 * cell);
            let mut slot = Plane::new(format!("slot{x}_{y}"), Rect::new(x0, y0, x0 + cell, y0 + cell));
            slot.surface.fill(Color::rgb(40, 40, 40));
            let slot = tree.insert(Some(root), slot).unwrap();
            let mut card = Plane::new("card", Rect::new(2.0, 2.0, cell - 2.0, cell - 2.0)).draggable();
            card.surface.fill(Color::rgb((x * 13 % 256) as u8, (y * 29 % 256) as u8, 200));
            cards.push(tree.insert(Some(slot), card).unwrap());
        }
    }
    (tree, root, cards)
}

fn bench_full_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_render");
    for &n in &[8usize, 16, 32] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("board_n{}", n), |b| {
            b.iter_batched(
                || gen_board(n, 24.0),
                |(mut tree, root, _)| {
                    let mut stats = Stats::default();
                    black_box(tree.render(root, None, &mut stats));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_incremental_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental_render");
    let (mut tree, root, cards) = gen_board(32, 24.0);
    let mut stats = Stats::default();
    tree.render(root, None, &mut stats);

    group.bench_function("unchanged", |b| {
        b.iter(|| black_box(tree.render(root, None, &mut stats)))
    });

    let card = cards[cards.len() / 2];
    let mut flip = false;
    group.bench_function("move_one_card", |b| {
        b.iter(|| {
            flip = !flip;
            let x = if flip { 3.0 } else { 2.0 };
            tree.set_origin(card, Point::new(x, 2.0));
            black_box(tree.render(root, None, &mut stats))
        })
    });

    group.bench_function("repaint_one_card", |b| {
        b.iter(|| {
            if let Some(s) = tree.surface_mut(card) {
                s.fill(Color::WHITE);
            }
            black_box(tree.render(root, None, &mut stats))
        })
    });

    group.bench_function("viewport_quarter", |b| {
        let viewport = Rect::new(0.0, 0.0, 192.0, 192.0);
        b.iter(|| {
            tree.invalidate(card);
            black_box(tree.render(root, Some(viewport), &mut stats))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_full_render, bench_incremental_render);
criterion_main!(benches);
