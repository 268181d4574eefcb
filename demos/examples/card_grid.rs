// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 3×3 grid of highlighted cells with captions that follow their cards.
//!
//! Shows ordered insertion with `insert_after`, position sync, widget names derived from
//! labels, hover highlighting, and the statistics overlay report.
//!
//! Run:
//! - `cargo run -p planes_demos --example card_grid`

use kurbo::{Point, Rect};
use planes_display::{Display, Event, VirtualPointer, keycode};
use planes_surface::Color;
use planes_tree::{KeyEvent, Plane, widget_name};

fn main() {
    tracing_subscriber::fmt().init();

    let mut display = Display::new(400, 400);
    let root = display.root();

    // Cells are created column by column but end up in row-major draw order.
    for col in 0..3 {
        for row in 0..3 {
            let (x, y) = (20.0 + f64::from(col) * 120.0, 20.0 + f64::from(row) * 120.0);
            let mut cell = Plane::new(
                format!("r{row}c{col}"),
                Rect::new(x, y, x + 100.0, y + 100.0),
            )
            .highlight();
            cell.surface.fill(Color::rgb(60, 60 + 40 * row as u8, 60 + 40 * col as u8));
            let after = (col > 0).then(|| format!("r{row}c{}", col - 1));
            let id = display.tree_mut().insert_detached(cell);
            display
                .tree_mut()
                .attach(root, id, after.as_deref())
                .unwrap();
        }
    }
    println!("draw order: {:?}", display.tree().child_names(root));

    // A caption under the first cell follows it around.
    let name = widget_name("Top left!").unwrap();
    let caption = display
        .insert(Plane::new(name, Rect::new(20.0, 125.0, 120.0, 135.0)))
        .unwrap();
    let first = display.tree().child(root, "r0c0").unwrap();
    display.tree_mut().sync(caption, first).unwrap();

    let mut pointer = VirtualPointer::new();
    pointer.move_to((70.0, 70.0));
    display
        .process(&[Event::KeyDown(KeyEvent::new(keycode::F12))], &pointer)
        .unwrap();
    display.update();
    display.render(&pointer);
    println!("hovered: {:?}", display.hovered().and_then(|p| display.tree().name(p)));

    display.tree_mut().set_origin(first, Point::new(30.0, 30.0));
    display.update();
    display.render(&pointer);
    println!("caption rect after moving its cell: {:?}", display.tree().rect(caption));

    for line in display.last_report() {
        println!("{line}");
    }
}
