// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless drag and drop through a display.
//!
//! Scripts a pointer that picks a card off one pile, carries it across and drops it on
//! another pile. Set `RUST_LOG=debug` to watch the display's diagnostics.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p planes_demos --example drag_and_drop`

use kurbo::{Point, Rect};
use planes_display::{Display, Event, VirtualPointer};
use planes_surface::Color;
use planes_tree::Plane;
use tracing_subscriber::EnvFilter;

fn pile(name: &str, x: f64) -> Plane {
    let mut p = Plane::new(name, Rect::new(x, 20.0, x + 120.0, 180.0)).grab();
    p.surface.fill(Color::rgb(20, 90, 40));
    p
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut display = Display::new(320, 200);
    let left = display.insert(pile("left", 20.0)).unwrap();
    let right = display.insert(pile("right", 180.0)).unwrap();

    let mut card = Plane::new("ace", Rect::new(30.0, 40.0, 90.0, 120.0)).draggable();
    card.surface.fill(Color::rgb(240, 240, 230));
    let card = display.tree_mut().insert(Some(left), card).unwrap();

    let mut pointer = VirtualPointer::new();
    let path = [(80.0, 100.0), (120.0, 100.0), (180.0, 100.0), (240.0, 100.0)];

    let mut script: Vec<Vec<Event>> = Vec::new();
    script.push(vec![]);
    script.push(vec![Event::ButtonDown {
        button: 1,
        position: Point::new(80.0, 100.0),
    }]);
    script.extend(path.iter().map(|_| vec![]));
    script.push(vec![Event::ButtonUp {
        button: 1,
        position: Point::new(240.0, 100.0),
    }]);

    let mut step = path.iter();
    for (n, events) in script.iter().enumerate() {
        match events.first() {
            Some(Event::ButtonDown { position, .. }) => {
                pointer.move_to(*position);
                pointer.press();
            }
            Some(Event::ButtonUp { .. }) => pointer.release(),
            _ => {
                if let Some(&p) = step.next().filter(|_| display.dragged().is_some()) {
                    pointer.move_to(p);
                }
            }
        }
        display.process(events, &pointer).unwrap();
        display.update();
        let presented = display.render(&pointer);
        println!(
            "frame {n}: presented={presented} dragging={:?} ghost={:?}",
            display.dragged().map(|_| "ace"),
            display.ghost_rect()
        );
    }

    let parent = display.tree().parent(card);
    println!(
        "card now lives in {:?}",
        parent.and_then(|p| display.tree().name(p))
    );
    assert_eq!(parent, Some(right));
}
