// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-plane hooks and callback slots.
//!
//! Two layers of customization exist:
//!
//! - Callbacks are plain closures stored in a plane's slots: a click handler per
//!   [`ButtonName`], a drop handler, and hover enter/exit handlers.
//!   They are invoked by the default hook implementations.
//! - A [`Behavior`] replaces the hooks themselves. Every method has a default that performs
//!   the stock plane behavior, so an implementation only overrides what it needs and can
//!   call the `Tree::default_*` method to keep the stock behavior as well.
//!
//! Hooks and callbacks receive the tree mutably together with the id of the plane they
//! belong to. While one runs it is taken out of its slot; it is put back afterwards only
//! if the plane is still alive and nothing else was installed meanwhile.

use kurbo::Point;

use crate::error::TreeError;
use crate::tree::Tree;
use crate::types::{ButtonName, KeyEvent, PlaneId};

/// Click callback: `(tree, clicked plane)`.
pub type ClickHandler = Box<dyn FnMut(&mut Tree, PlaneId)>;

/// Drop callback: `(tree, target plane, dropped plane, point in target space)`.
pub type DropHandler = Box<dyn FnMut(&mut Tree, PlaneId, PlaneId, Point)>;

/// Hover callback: `(tree, hovered plane)`.
pub type HoverHandler = Box<dyn FnMut(&mut Tree, PlaneId)>;

/// Overridable per-plane hooks.
pub trait Behavior {
    /// Per-frame logic, run before the plane's children are updated.
    fn update(&mut self, tree: &mut Tree, id: PlaneId) {
        let _ = (tree, id);
    }

    /// The plane was clicked with `button`.
    fn clicked(&mut self, tree: &mut Tree, id: PlaneId, button: ButtonName) {
        tree.default_clicked(id, button);
    }

    /// `dropped` was released over this plane at `point` (in this plane's space).
    fn dropped_upon(
        &mut self,
        tree: &mut Tree,
        id: PlaneId,
        dropped: PlaneId,
        point: Point,
    ) -> Result<(), TreeError> {
        tree.default_dropped_upon(id, dropped, point)
    }

    /// A key was pressed while this plane had the keyboard focus.
    fn keydown(&mut self, tree: &mut Tree, id: PlaneId, key: &KeyEvent) {
        let _ = (tree, id, key);
    }

    /// The plane received the keyboard focus.
    fn activate(&mut self, tree: &mut Tree, id: PlaneId) {
        let _ = (tree, id);
    }

    /// The plane lost the keyboard focus.
    fn deactivate(&mut self, tree: &mut Tree, id: PlaneId) {
        let _ = (tree, id);
    }

    /// The pointer moved onto this plane.
    fn hover_enter(&mut self, tree: &mut Tree, id: PlaneId) {
        tree.default_hover_enter(id);
    }

    /// The pointer left this plane.
    fn hover_exit(&mut self, tree: &mut Tree, id: PlaneId) {
        tree.default_hover_exit(id);
    }
}

/// Callback slots of one plane.
#[derive(Default)]
pub(crate) struct Callbacks {
    pub(crate) click: [Option<ClickHandler>; 4],
    pub(crate) dropped: Option<DropHandler>,
    pub(crate) hover_enter: Option<HoverHandler>,
    pub(crate) hover_exit: Option<HoverHandler>,
}

impl core::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let clicks: Vec<ButtonName> = ButtonName::ALL
            .into_iter()
            .filter(|b| self.click[b.index()].is_some())
            .collect();
        f.debug_struct("Callbacks")
            .field("click", &clicks)
            .field("dropped", &self.dropped.is_some())
            .field("hover_enter", &self.hover_enter.is_some())
            .field("hover_exit", &self.hover_exit.is_some())
            .finish()
    }
}
