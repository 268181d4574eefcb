// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cached compositing.
//!
//! Every plane with children keeps a composite: its own surface with the composites of its
//! children blitted on top in draw order. Rendering walks the tree bottom-up and rebuilds a
//! composite only when something beneath it changed:
//!
//! - the plane's own image (its version moved on),
//! - a child's composite was rebuilt,
//! - a visible child moved, or was attached, replaced or uncovered (its cached rectangle is
//!   stale),
//! - the set of children inside the viewport is not the set drawn last time.
//!
//! Children whose rectangle misses the viewport are neither rendered nor blitted, and their
//! cached rectangle is left alone.

use kurbo::{Point, Rect};
use tracing::trace;

use crate::geometry::{collide, pixel_origin, to_local};
use crate::stats::Stats;
use crate::tree::{Composite, Tree};
use crate::types::{PlaneFlags, PlaneId};

impl Tree {
    /// Bring the composite of `id` up to date, limited to `viewport` in `id`'s local space.
    ///
    /// Without a viewport the whole plane is rendered. Returns `true` when the composite
    /// differs from what the previous render produced; a second render of an unmodified
    /// tree returns `false` and leaves every composite untouched.
    pub fn render(&mut self, id: PlaneId, viewport: Option<Rect>, stats: &mut Stats) -> bool {
        let Some(node) = self.node_opt_mut(id) else {
            return false;
        };
        let viewport =
            viewport.unwrap_or_else(|| Rect::from_origin_size(Point::ZERO, node.rect.size()));
        let area = node.surface.area();

        if !node.has_children() {
            stats.total_pixels += area;
            if matches!(node.composite, Composite::Aliased) && node.cached_version == node.version
            {
                stats.unchanged_planes += 1;
                return false;
            }
            node.composite = Composite::Aliased;
            node.cached_version = node.version;
            node.drawn.clear();
            return true;
        }

        stats.total_pixels += area * 2;
        let mut changed =
            node.cached_version != node.version || !matches!(node.composite, Composite::Owned(_));
        let children = node.child_ids();
        let mut visible = Vec::with_capacity(children.len());
        let mut culled = 0;

        for &child in &children {
            let rect = self.node(child).rect;
            if !collide(rect, viewport) {
                stats.render_skip += 1;
                culled += 1;
                continue;
            }
            visible.push(child);
            let child_changed = self.render(child, Some(to_local(viewport, rect.origin())), stats);
            let c = self.node_mut(child);
            if child_changed || c.cached_rect != Some(rect) {
                c.cached_rect = Some(rect);
                changed = true;
            }
        }
        // Children entering or leaving the viewport, or removed, alter the picture.
        if self.node(id).drawn != visible {
            changed = true;
        }

        if !changed {
            stats.unchanged_planes += 1;
            return false;
        }

        let mut composite = self.node(id).surface.clone();
        stats.blit_skip += culled;
        for &child in &visible {
            let c = self.node(child);
            let (x, y) = pixel_origin(c.rect);
            let image = c.composite_surface();
            composite.blit(image, x, y);
            if c.flags.contains(PlaneFlags::HOVER) {
                composite.blit_add(&image.highlight_overlay(), x, y);
            }
        }
        trace!(plane = %id, children = children.len(), "rebuilt composite");

        let node = self.node_mut(id);
        node.composite = Composite::Owned(composite);
        node.cached_version = node.version;
        node.drawn = visible;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Plane;
    use planes_surface::Color;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn filled(name: &str, x: f64, y: f64, w: u32, h: u32, color: Color) -> Plane {
        let mut plane = Plane::new(name, Rect::new(x, y, x + f64::from(w), y + f64::from(h)));
        plane.surface.fill(color);
        plane
    }

    fn scene() -> (Tree, PlaneId, PlaneId, PlaneId) {
        let mut tree = Tree::new();
        let root = tree
            .insert(None, filled("root", 0.0, 0.0, 40, 40, Color::BLACK))
            .unwrap();
        let a = tree
            .insert(Some(root), filled("a", 0.0, 0.0, 10, 10, RED))
            .unwrap();
        let b = tree
            .insert(Some(root), filled("b", 5.0, 5.0, 10, 10, BLUE))
            .unwrap();
        (tree, root, a, b)
    }

    #[test]
    fn leaf_composite_aliases_surface() {
        let mut tree = Tree::new();
        let leaf = tree.insert(None, filled("leaf", 0.0, 0.0, 4, 4, RED)).unwrap();
        let mut stats = Stats::default();
        assert!(tree.render(leaf, None, &mut stats));
        assert!(!tree.render(leaf, None, &mut stats));
        assert_eq!(tree.composite(leaf).unwrap().pixel(0, 0), Some(RED));
    }

    #[test]
    fn children_are_drawn_in_order() {
        let (mut tree, root, _, _) = scene();
        let mut stats = Stats::default();
        assert!(tree.render(root, None, &mut stats));
        let c = tree.composite(root).unwrap();
        assert_eq!(c.pixel(1, 1), Some(RED));
        assert_eq!(c.pixel(7, 7), Some(BLUE), "later sibling on top");
        assert_eq!(c.pixel(30, 30), Some(Color::BLACK));
        // Own surface is never drawn into.
        assert_eq!(tree.surface(root).unwrap().pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn second_render_is_unchanged() {
        let (mut tree, root, _, _) = scene();
        let mut stats = Stats::default();
        assert!(tree.render(root, None, &mut stats));
        let before = tree.composite(root).unwrap().clone();
        stats.begin_render();
        assert!(!tree.render(root, None, &mut stats));
        assert_eq!(stats.unchanged_planes, 3);
        assert_eq!(tree.composite(root).unwrap().pixels(), before.pixels());
    }

    #[test]
    fn moving_a_child_rebuilds_the_parent() {
        let (mut tree, root, a, _) = scene();
        let mut stats = Stats::default();
        tree.render(root, None, &mut stats);
        tree.set_origin(a, Point::new(20.0, 20.0));
        assert!(tree.render(root, None, &mut stats));
        let c = tree.composite(root).unwrap();
        assert_eq!(c.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(c.pixel(21, 21), Some(RED));
    }

    #[test]
    fn modifying_a_grandchild_propagates() {
        let (mut tree, root, a, _) = scene();
        let g = tree
            .insert(Some(a), filled("g", 0.0, 0.0, 2, 2, BLUE))
            .unwrap();
        let mut stats = Stats::default();
        tree.render(root, None, &mut stats);
        assert_eq!(tree.composite(root).unwrap().pixel(0, 0), Some(BLUE));
        tree.surface_mut(g).unwrap().fill(Color::WHITE);
        assert!(tree.render(root, None, &mut stats));
        assert_eq!(tree.composite(root).unwrap().pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn detaching_uncovers_what_was_below() {
        let (mut tree, root, _, b) = scene();
        let mut stats = Stats::default();
        tree.render(root, None, &mut stats);
        tree.detach(root, b).unwrap();
        assert!(tree.render(root, None, &mut stats));
        let c = tree.composite(root).unwrap();
        assert_eq!(c.pixel(7, 7), Some(RED));
        assert_eq!(c.pixel(12, 12), Some(Color::BLACK));
    }

    #[test]
    fn removing_the_last_child_aliases_again() {
        let (mut tree, root, a, b) = scene();
        let mut stats = Stats::default();
        tree.render(root, None, &mut stats);
        tree.destroy(a);
        tree.destroy(b);
        assert!(tree.render(root, None, &mut stats));
        assert_eq!(tree.composite(root).unwrap().pixel(1, 1), Some(Color::BLACK));
        assert!(!tree.render(root, None, &mut stats));
    }

    #[test]
    fn children_outside_the_viewport_are_skipped() {
        let (mut tree, root, _, _) = scene();
        let _far = tree
            .insert(Some(root), filled("far", 30.0, 30.0, 5, 5, RED))
            .unwrap();
        let mut stats = Stats::default();
        tree.render(root, Some(Rect::new(0.0, 0.0, 20.0, 20.0)), &mut stats);
        assert_eq!(stats.render_skip, 1);
        assert_eq!(stats.blit_skip, 1);
        assert_eq!(tree.composite(root).unwrap().pixel(31, 31), Some(Color::BLACK));
    }

    #[test]
    fn culled_child_keeps_its_cached_rect() {
        let mut tree = Tree::new();
        let root = tree
            .insert(None, filled("root", 0.0, 0.0, 100, 100, Color::BLACK))
            .unwrap();
        tree.insert(Some(root), filled("a", 0.0, 0.0, 10, 10, RED))
            .unwrap();
        let far = tree
            .insert(Some(root), filled("far", 200.0, 200.0, 10, 10, BLUE))
            .unwrap();
        let mut stats = Stats::default();
        tree.render(root, None, &mut stats);
        assert_eq!(stats.render_skip, 1);
        assert_eq!(tree.node(far).cached_rect, None);

        // Moving around out of view changes nothing that is drawn.
        tree.set_origin(far, Point::new(300.0, 300.0));
        stats.begin_render();
        assert!(!tree.render(root, None, &mut stats));
        assert_eq!(tree.node(far).cached_rect, None);
    }

    #[test]
    fn child_leaving_the_viewport_is_erased() {
        let (mut tree, root, a, _) = scene();
        let viewport = Some(Rect::new(0.0, 0.0, 20.0, 20.0));
        let mut stats = Stats::default();
        tree.render(root, viewport, &mut stats);
        let drawn_at = tree.node(a).cached_rect;
        assert!(drawn_at.is_some());

        tree.set_origin(a, Point::new(30.0, 30.0));
        stats.begin_render();
        assert!(tree.render(root, viewport, &mut stats));
        assert_eq!(stats.render_skip, 1);
        assert_eq!(tree.composite(root).unwrap().pixel(1, 1), Some(Color::BLACK));
        assert_eq!(tree.node(a).cached_rect, drawn_at, "culled pass leaves it alone");
    }

    #[test]
    fn wider_viewport_draws_children_culled_before() {
        let (mut tree, root, _, _) = scene();
        tree.insert(Some(root), filled("far", 30.0, 30.0, 5, 5, RED))
            .unwrap();
        let mut stats = Stats::default();
        tree.render(root, Some(Rect::new(0.0, 0.0, 20.0, 20.0)), &mut stats);
        assert_eq!(tree.composite(root).unwrap().pixel(31, 31), Some(Color::BLACK));
        assert!(tree.render(root, None, &mut stats));
        assert_eq!(tree.composite(root).unwrap().pixel(31, 31), Some(RED));
        assert!(!tree.render(root, None, &mut stats));
    }

    #[test]
    fn moved_container_keeps_its_composite() {
        let mut tree = Tree::new();
        let root = tree
            .insert(None, filled("root", 0.0, 0.0, 100, 100, Color::BLACK))
            .unwrap();
        let c = tree
            .insert(Some(root), filled("c", 10.0, 10.0, 20, 20, BLUE))
            .unwrap();
        tree.insert(Some(c), filled("g", 0.0, 0.0, 5, 5, RED))
            .unwrap();
        let mut stats = Stats::default();
        tree.render(root, None, &mut stats);

        tree.set_origin(c, Point::new(20.0, 10.0));
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        let local = to_local(viewport, Point::new(20.0, 10.0));
        stats.begin_render();
        assert!(!tree.render(c, Some(local), &mut stats));
        assert_eq!(stats.unchanged_planes, 2);

        // The parent still re-blits it at the new place.
        assert!(tree.render(root, None, &mut stats));
        let composite = tree.composite(root).unwrap();
        assert_eq!(composite.pixel(21, 11), Some(RED));
        assert_eq!(composite.pixel(11, 11), Some(Color::BLACK));
    }

    #[test]
    fn hovered_child_is_highlighted() {
        let mut tree = Tree::new();
        let root = tree
            .insert(None, filled("root", 0.0, 0.0, 10, 10, Color::BLACK))
            .unwrap();
        let grey = Color::rgb(100, 100, 100);
        let lit = tree
            .insert(Some(root), filled("lit", 0.0, 0.0, 4, 4, grey).highlight())
            .unwrap();
        let mut stats = Stats::default();
        tree.render(root, None, &mut stats);
        assert_eq!(tree.composite(root).unwrap().pixel(0, 0), Some(grey));

        tree.hover_enter(lit);
        assert!(tree.render(root, None, &mut stats));
        let lit_px = tree.composite(root).unwrap().pixel(0, 0).unwrap();
        assert!(lit_px.r > grey.r, "highlight brightens: {lit_px:?}");

        tree.hover_exit(lit);
        assert!(tree.render(root, None, &mut stats));
        assert_eq!(tree.composite(root).unwrap().pixel(0, 0), Some(grey));
    }

    #[test]
    fn pixel_counters_follow_structure() {
        let (mut tree, root, _, _) = scene();
        let mut stats = Stats::default();
        tree.render(root, None, &mut stats);
        assert_eq!(stats.total_pixels, 40 * 40 * 2 + 100 + 100);
    }
}
