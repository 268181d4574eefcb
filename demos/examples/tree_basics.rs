// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane tree basics.
//!
//! Build a small tree, render it, move a plane, render again, and hit-test.
//!
//! Run:
//! - `cargo run -p planes_demos --example tree_basics`

use kurbo::{Point, Rect};
use planes_surface::Color;
use planes_tree::{Plane, Stats, Tree};

fn main() {
    // Build a small tree
    let mut tree = Tree::new();
    let root = tree.insert_detached(Plane::new("root", Rect::new(0.0, 0.0, 200.0, 200.0)));

    let mut a = Plane::new("a", Rect::new(10.0, 10.0, 60.0, 60.0));
    a.surface.fill(Color::rgb(200, 40, 40));
    let a = tree.insert(Some(root), a).unwrap();

    let mut b = Plane::new("b", Rect::new(40.0, 40.0, 120.0, 120.0));
    b.surface.fill(Color::rgb(40, 40, 200));
    let b = tree.insert(Some(root), b).unwrap();

    let mut stats = Stats::default();
    println!("first render changed: {}", tree.render(root, None, &mut stats));
    println!("second render changed: {}", tree.render(root, None, &mut stats));

    // Move A to the right and render again
    tree.set_origin(a, Point::new(130.0, 10.0));
    stats.begin_render();
    println!("after move changed: {}", tree.render(root, None, &mut stats));
    for line in stats.report() {
        println!("  {line}");
    }

    // Hit-test: B is drawn last, so it wins where it overlaps
    let (hit, local) = tree.plane_at(root, Point::new(50.0, 50.0));
    println!("hit at (50,50): {:?} local {:?}", tree.name(hit), local);
    assert_eq!(hit, b);

    let composite = tree.composite(root).unwrap();
    println!("pixel (140, 20) = {:?}", composite.pixel(140, 20));
}
