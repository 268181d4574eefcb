// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests over random sequences of tree mutations.
//!
//! After every sequence:
//!
//! 1. Parent and child links agree, and every plane is listed by at most one parent.
//! 2. Sibling names are unique and the name list matches the children.
//! 3. No plane is its own ancestor.
//! 4. The incrementally maintained root composite equals a from-scratch composite.
//! 5. Rendering twice in a row reports no change the second time.

use std::collections::HashSet;

use kurbo::{Point, Rect};
use planes_surface::{Color, Surface};
use planes_tree::{Plane, PlaneId, Stats, Tree, pixel_origin};
use proptest::prelude::*;

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Debug, Clone)]
enum Op {
    Insert { parent: usize, name: usize, x: i8, y: i8, shade: u8 },
    Attach { parent: usize, child: usize, after: Option<usize> },
    Detach { parent: usize, child: usize },
    Destroy(usize),
    Move { plane: usize, x: i8, y: i8 },
    Repaint { plane: usize, shade: u8 },
    Render,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..16, 0usize..4, any::<i8>(), any::<i8>(), any::<u8>())
            .prop_map(|(parent, name, x, y, shade)| Op::Insert { parent, name, x, y, shade }),
        2 => (0usize..16, 0usize..16, proptest::option::of(0usize..4))
            .prop_map(|(parent, child, after)| Op::Attach { parent, child, after }),
        1 => (0usize..16, 0usize..16).prop_map(|(parent, child)| Op::Detach { parent, child }),
        1 => (1usize..16).prop_map(Op::Destroy),
        2 => (0usize..16, any::<i8>(), any::<i8>())
            .prop_map(|(plane, x, y)| Op::Move { plane, x, y }),
        1 => (0usize..16, any::<u8>()).prop_map(|(plane, shade)| Op::Repaint { plane, shade }),
        2 => Just(Op::Render),
    ]
}

struct Harness {
    tree: Tree,
    root: PlaneId,
    ids: Vec<PlaneId>,
    stats: Stats,
}

impl Harness {
    fn new() -> Self {
        let mut tree = Tree::new();
        let root = tree
            .insert(None, Plane::new("root", Rect::new(0.0, 0.0, 64.0, 64.0)))
            .unwrap();
        Self {
            tree,
            root,
            ids: vec![root],
            stats: Stats::default(),
        }
    }

    fn pick(&self, i: usize) -> PlaneId {
        self.ids[i % self.ids.len()]
    }

    fn apply(&mut self, op: &Op) {
        match *op {
            Op::Insert { parent, name, x, y, shade } => {
                let parent = self.pick(parent);
                let origin = Point::new(f64::from(x / 4), f64::from(y / 4));
                let mut plane = Plane::new(NAMES[name], Rect::from_origin_size(origin, (12.0, 9.0)));
                plane.surface.fill(Color::rgb(shade, shade.wrapping_mul(7), 40));
                if let Ok(id) = self.tree.insert(Some(parent), plane) {
                    self.ids.push(id);
                }
            }
            Op::Attach { parent, child, after } => {
                let (parent, child) = (self.pick(parent), self.pick(child));
                // Cycles and stale ids are expected to fail without effect.
                let _ = self.tree.attach(parent, child, after.map(|i| NAMES[i]));
            }
            Op::Detach { parent, child } => {
                let (parent, child) = (self.pick(parent), self.pick(child));
                let _ = self.tree.detach(parent, child);
            }
            Op::Destroy(i) => {
                let id = self.pick(i);
                if id != self.root {
                    self.tree.destroy(id);
                }
            }
            Op::Move { plane, x, y } => {
                let id = self.pick(plane);
                if id != self.root {
                    self.tree
                        .set_origin(id, Point::new(f64::from(x / 4), f64::from(y / 4)));
                }
            }
            Op::Repaint { plane, shade } => {
                if let Some(s) = self.tree.surface_mut(self.pick(plane)) {
                    s.fill(Color::rgb(shade, 90, shade));
                }
            }
            Op::Render => {
                self.tree.render(self.root, None, &mut self.stats);
            }
        }
    }
}

fn from_scratch(tree: &Tree, id: PlaneId) -> Surface {
    let mut out = tree.surface(id).unwrap().clone();
    for child in tree.children(id) {
        let (x, y) = pixel_origin(tree.rect(child).unwrap());
        out.blit(&from_scratch(tree, child), x, y);
    }
    out
}

fn check_structure(tree: &Tree, ids: &[PlaneId]) -> Result<(), TestCaseError> {
    let mut listed = HashSet::new();
    for &id in ids.iter().filter(|id| tree.is_alive(**id)) {
        let children = tree.children(id);
        let names = tree.child_names(id);
        prop_assert_eq!(children.len(), names.len());
        let unique: HashSet<&String> = names.iter().collect();
        prop_assert_eq!(unique.len(), names.len(), "duplicate sibling names");
        for (child, name) in children.iter().zip(names) {
            prop_assert_eq!(tree.parent(*child), Some(id));
            prop_assert_eq!(tree.name(*child), Some(name.as_str()));
            prop_assert!(listed.insert(*child), "{child} listed by two parents");
        }
        if let Some(parent) = tree.parent(id) {
            prop_assert!(tree.children(parent).contains(&id));
        }
        prop_assert!(!tree.is_ancestor(id, id), "{id} is its own ancestor");
    }
    Ok(())
}

proptest! {
    #[test]
    fn structure_holds_under_random_mutation(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut h = Harness::new();
        for op in &ops {
            h.apply(op);
            check_structure(&h.tree, &h.ids)?;
        }
    }

    #[test]
    fn incremental_composite_matches_full_rebuild(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut h = Harness::new();
        for op in &ops {
            h.apply(op);
        }
        h.tree.render(h.root, None, &mut h.stats);
        let expected = from_scratch(&h.tree, h.root);
        prop_assert_eq!(h.tree.composite(h.root).unwrap().pixels(), expected.pixels());
    }

    #[test]
    fn second_render_reports_no_change(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut h = Harness::new();
        for op in &ops {
            h.apply(op);
        }
        h.tree.render(h.root, None, &mut h.stats);
        prop_assert!(!h.tree.render(h.root, None, &mut h.stats));
    }
}
