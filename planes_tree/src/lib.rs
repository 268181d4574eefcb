// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planes Tree: a retained-mode tree of rectangular image layers with cached compositing.
//!
//! Each plane owns an image ([`planes_surface::Surface`]) and a rectangle in its parent's
//! space. Children are drawn on top of their parent in insertion order, and the result is
//! cached per plane so that rendering an unchanged subtree costs nothing.
//!
//! - Structure: [`Tree::insert`], [`Tree::attach`] (with optional placement after a named
//!   sibling), [`Tree::detach`], [`Tree::detach_all`], [`Tree::destroy`].
//!   Children are unique by name among their siblings; attaching a same-named plane replaces
//!   the existing one.
//! - Rendering: [`Tree::render`] rebuilds only the composites whose subtree changed and skips
//!   children outside a viewport. [`Stats`] collects counters along the way.
//! - Hit testing: [`Tree::plane_at`] returns the topmost deepest plane under a point, with the
//!   point translated into that plane's space.
//! - Interaction: per-plane [`Behavior`] hooks and callback slots for clicks, drops, hover and
//!   keyboard focus. The default hooks implement grabbing drops and the hover highlight.
//! - Position sync: [`Tree::sync`] locks one plane to the movement of another.
//!
//! Event sources, frame timing and presentation are left to a host; see the `planes_display`
//! crate for one.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect};
//! use planes_surface::Color;
//! use planes_tree::{Plane, Stats, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, Plane::new("root", Rect::new(0.0, 0.0, 100.0, 100.0))).unwrap();
//!
//! let mut card = Plane::new("card", Rect::new(10.0, 10.0, 40.0, 40.0)).draggable();
//! card.surface.fill(Color::rgb(200, 30, 30));
//! let card = tree.insert(Some(root), card).unwrap();
//!
//! let mut stats = Stats::default();
//! assert!(tree.render(root, None, &mut stats));
//! assert_eq!(tree.composite(root).unwrap().pixel(15, 15), Some(Color::rgb(200, 30, 30)));
//!
//! // Nothing changed, nothing to do.
//! assert!(!tree.render(root, None, &mut stats));
//!
//! let (hit, local) = tree.plane_at(root, Point::new(15.0, 20.0));
//! assert_eq!(hit, card);
//! assert_eq!(local, Point::new(5.0, 10.0));
//! ```

mod behavior;
mod error;
mod geometry;
mod label;
mod render;
mod stats;
mod tree;
mod types;

pub use behavior::{Behavior, ClickHandler, DropHandler, HoverHandler};
pub use error::{NotFoundError, StructuralError, TreeError, ValidationError};
pub use geometry::{center_of, centered_at, collide, offset, pixel_origin, pixel_size, to_local};
pub use label::widget_name;
pub use stats::{DEFAULT_WINDOW, Stats};
pub use tree::Tree;
pub use types::{ButtonName, ChildRef, KeyEvent, Plane, PlaneFlags, PlaneId};
