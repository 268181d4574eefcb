// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, mutation, hooks, hit testing, and position sync.

use hashbrown::HashMap;
use kurbo::{Point, Rect, Vec2};
use planes_surface::Surface;
use tracing::debug;

use crate::behavior::{Behavior, Callbacks, ClickHandler};
use crate::error::{NotFoundError, StructuralError, TreeError};
use crate::geometry::{center_of, centered_at, offset};
use crate::stats::Stats;
use crate::types::{ButtonName, ChildRef, KeyEvent, Plane, PlaneFlags, PlaneId};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena of planes.
///
/// Planes are created detached with [`Tree::insert`] and linked with [`Tree::attach`].
/// Every plane is owned by the arena; the parent/child relation is stored as ids, so a
/// plane is listed by at most one parent and its `parent` field always names that parent.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    pub(crate) free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("planes_total", &total)
            .field("planes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

/// Composite state of a plane.
pub(crate) enum Composite {
    /// The composite is the plane's own surface.
    Aliased,
    /// Children were added; the composite must be built by the next render.
    Pending,
    /// A separately owned composite of the plane and its subtree.
    Owned(Surface),
}

/// Position lock onto another plane.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SyncLink {
    master: PlaneId,
    offset: Vec2,
}

pub(crate) struct Node {
    generation: u32,
    pub(crate) name: String,
    pub(crate) surface: Surface,
    pub(crate) version: u64,
    pub(crate) composite: Composite,
    pub(crate) rect: Rect,
    parent: Option<PlaneId>,
    children: HashMap<String, PlaneId>,
    order: Vec<String>,
    pub(crate) flags: PlaneFlags,
    pub(crate) cached_version: u64,
    pub(crate) cached_rect: Option<Rect>,
    /// Children blitted into the owned composite, in draw order.
    pub(crate) drawn: Vec<PlaneId>,
    callbacks: Callbacks,
    behavior: Option<Box<dyn Behavior>>,
    sync: Option<SyncLink>,
}

impl core::fmt::Debug for Node {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("rect", &self.rect)
            .field("parent", &self.parent)
            .field("order", &self.order)
            .field("flags", &self.flags)
            .field("version", &self.version)
            .field("cached_version", &self.cached_version)
            .field("cached_rect", &self.cached_rect)
            .field("drawn", &self.drawn)
            .field("callbacks", &self.callbacks)
            .field("behavior", &self.behavior.is_some())
            .field("sync", &self.sync)
            .finish_non_exhaustive()
    }
}

impl Node {
    fn new(generation: u32, plane: Plane) -> Self {
        let rect = plane.rect();
        Self {
            generation,
            name: plane.name,
            surface: plane.surface,
            version: 0,
            composite: Composite::Aliased,
            rect,
            parent: None,
            children: HashMap::new(),
            order: Vec::new(),
            flags: plane.flags,
            cached_version: 0,
            cached_rect: None,
            drawn: Vec::new(),
            callbacks: Callbacks::default(),
            behavior: None,
            sync: None,
        }
    }

    pub(crate) fn has_children(&self) -> bool {
        !self.order.is_empty()
    }

    /// Children in draw order (back to front).
    pub(crate) fn child_ids(&self) -> Vec<PlaneId> {
        self.order
            .iter()
            .filter_map(|name| self.children.get(name).copied())
            .collect()
    }

    /// The surface the parent blits: the composite, or the own surface while aliased.
    pub(crate) fn composite_surface(&self) -> &Surface {
        match &self.composite {
            Composite::Owned(s) => s,
            Composite::Aliased | Composite::Pending => &self.surface,
        }
    }
}

/// Callback slots sharing the plain `(tree, plane)` signature.
#[derive(Copy, Clone, Debug)]
enum PlaneSlot {
    Click(ButtonName),
    HoverEnter,
    HoverExit,
}

impl Callbacks {
    fn plane_slot(&mut self, slot: PlaneSlot) -> &mut Option<ClickHandler> {
        match slot {
            PlaneSlot::Click(button) => &mut self.click[button.index()],
            PlaneSlot::HoverEnter => &mut self.hover_enter,
            PlaneSlot::HoverExit => &mut self.hover_exit,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new plane, attached under `parent` or detached if `None`.
    pub fn insert(&mut self, parent: Option<PlaneId>, plane: Plane) -> Result<PlaneId, TreeError> {
        if let Some(p) = parent {
            self.ensure_alive(p)?;
        }
        let id = self.insert_detached(plane);
        if let Some(p) = parent {
            self.attach(p, id, None)?;
        }
        Ok(id)
    }

    /// Insert a new plane without a parent.
    pub fn insert_detached(&mut self, plane: Plane) -> PlaneId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, plane));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, plane)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "PlaneId uses 32-bit indices by design."
        )]
        let id = PlaneId::new(idx as u32, generation);
        id
    }

    /// Make `child` a child of `parent`.
    ///
    /// - A child that already has a parent is detached there first.
    /// - A sibling with the same name is detached and replaced; its own children stay with it.
    /// - The child is appended to the draw order, or placed right after `insert_after`
    ///   when that names an existing sibling.
    ///
    /// Attaching a plane under itself or one of its descendants fails with
    /// [`StructuralError::Cycle`] and leaves the tree unchanged.
    pub fn attach(
        &mut self,
        parent: PlaneId,
        child: PlaneId,
        insert_after: Option<&str>,
    ) -> Result<(), TreeError> {
        self.ensure_alive(parent)?;
        self.ensure_alive(child)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(StructuralError::Cycle { parent, child }.into());
        }
        if let Some(old_parent) = self.node(child).parent {
            self.unlink(old_parent, child);
        }
        let name = self.node(child).name.clone();
        if let Some(&existing) = self.node(parent).children.get(&name) {
            debug!(%parent, %existing, name = %name, "replacing sibling with the same name");
            self.unlink(parent, existing);
        }

        let p = self.node_mut(parent);
        let position = insert_after.and_then(|after| p.order.iter().position(|n| n == after));
        match position {
            Some(i) => p.order.insert(i + 1, name.clone()),
            None => p.order.push(name.clone()),
        }
        p.children.insert(name, child);
        // The composite is rebuilt lazily by the next render.
        if matches!(p.composite, Composite::Aliased) {
            p.composite = Composite::Pending;
        }

        let c = self.node_mut(child);
        c.parent = Some(parent);
        c.cached_rect = None;
        debug!(%parent, %child, ?insert_after, "attached plane");
        Ok(())
    }

    /// Detach a child given by name or id. Returns the detached plane, which stays alive.
    ///
    /// Every remaining sibling is scheduled for a redraw.
    pub fn detach<'a>(
        &mut self,
        parent: PlaneId,
        child: impl Into<ChildRef<'a>>,
    ) -> Result<PlaneId, TreeError> {
        self.ensure_alive(parent)?;
        let id = match child.into() {
            ChildRef::Name(name) => self.child(parent, name)?,
            ChildRef::Id(id) => {
                if self.parent(id) != Some(parent) {
                    let name = self
                        .name(id)
                        .map_or_else(|| id.to_string(), str::to_owned);
                    return Err(NotFoundError { parent, name }.into());
                }
                id
            }
        };
        self.unlink(parent, id);
        debug!(%parent, child = %id, "detached plane");
        Ok(id)
    }

    /// Detach every child of `parent`, returning them in former draw order.
    pub fn detach_all(&mut self, parent: PlaneId) -> Result<Vec<PlaneId>, TreeError> {
        self.ensure_alive(parent)?;
        // Detaching mutates the order list.
        let names = self.node(parent).order.clone();
        let mut out = Vec::with_capacity(names.len());
        for name in &names {
            out.push(self.detach(parent, name)?);
        }
        Ok(out)
    }

    /// Destroy a plane and its whole subtree.
    ///
    /// The plane is detached from its parent, its descendants are destroyed, and its
    /// surfaces, callbacks and sync state are released. All of their ids become stale.
    /// Destroying a stale id does nothing.
    pub fn destroy(&mut self, id: PlaneId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink(parent, id);
        }
        let children = self.node(id).child_ids();
        for child in children {
            self.destroy(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
        debug!(plane = %id, "destroyed plane");
    }

    /// Look up a child by name.
    pub fn child(&self, parent: PlaneId, name: &str) -> Result<PlaneId, NotFoundError> {
        self.node_opt(parent)
            .and_then(|p| p.children.get(name).copied())
            .ok_or_else(|| NotFoundError {
                parent,
                name: name.to_owned(),
            })
    }

    /// Children in draw order (back to front). Empty for stale ids.
    pub fn children(&self, id: PlaneId) -> Vec<PlaneId> {
        self.node_opt(id).map(Node::child_ids).unwrap_or_default()
    }

    /// Child names in draw order. Empty for stale ids.
    pub fn child_names(&self, id: PlaneId) -> &[String] {
        self.node_opt(id).map_or(&[], |n| n.order.as_slice())
    }

    /// Parent of a plane, `None` for roots, detached planes and stale ids.
    pub fn parent(&self, id: PlaneId) -> Option<PlaneId> {
        self.node_opt(id)?.parent
    }

    /// Name of a plane.
    pub fn name(&self, id: PlaneId) -> Option<&str> {
        self.node_opt(id).map(|n| n.name.as_str())
    }

    /// Rectangle in parent space.
    pub fn rect(&self, id: PlaneId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.rect)
    }

    /// Move or resize a plane. The composite picks the change up at the next render.
    pub fn set_rect(&mut self, id: PlaneId, rect: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.rect = rect;
        }
    }

    /// Move a plane's top-left corner.
    pub fn set_origin(&mut self, id: PlaneId, origin: Point) {
        if let Some(n) = self.node_opt_mut(id) {
            n.rect = n.rect.with_origin(origin);
        }
    }

    /// Center of a plane in parent space.
    pub fn center(&self, id: PlaneId) -> Option<Point> {
        self.node_opt(id).map(|n| center_of(n.rect))
    }

    /// Move a plane so that its center lies at `center`.
    pub fn set_center(&mut self, id: PlaneId, center: Point) {
        if let Some(n) = self.node_opt_mut(id) {
            n.rect = centered_at(n.rect, center);
        }
    }

    /// Interaction flags.
    pub fn flags(&self, id: PlaneId) -> Option<PlaneFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Replace the interaction flags.
    pub fn set_flags(&mut self, id: PlaneId, flags: PlaneFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
        }
    }

    /// The plane's own image.
    pub fn surface(&self, id: PlaneId) -> Option<&Surface> {
        self.node_opt(id).map(|n| &n.surface)
    }

    /// Mutable access to the plane's own image.
    ///
    /// Bumps the plane's version, so the next render rebuilds everything above it.
    pub fn surface_mut(&mut self, id: PlaneId) -> Option<&mut Surface> {
        let n = self.node_opt_mut(id)?;
        n.version = n.version.wrapping_add(1);
        Some(&mut n.surface)
    }

    /// Replace the plane's own image. The rectangle is left as it is.
    pub fn set_surface(&mut self, id: PlaneId, surface: Surface) {
        if let Some(n) = self.node_opt_mut(id) {
            n.surface = surface;
            n.version = n.version.wrapping_add(1);
        }
    }

    /// The composite of the plane and its subtree as of the last render.
    pub fn composite(&self, id: PlaneId) -> Option<&Surface> {
        self.node_opt(id).map(Node::composite_surface)
    }

    /// Content version of the plane's own image.
    pub fn version(&self, id: PlaneId) -> Option<u64> {
        self.node_opt(id).map(|n| n.version)
    }

    /// Force the parent to re-blit this plane at the next render.
    pub fn invalidate(&mut self, id: PlaneId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.cached_rect = None;
        }
    }

    /// Number of live planes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// True when no plane is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` refers to a live plane.
    ///
    /// A `PlaneId` is live if its slot exists and its generation matches the generation
    /// stored in that slot.
    pub fn is_alive(&self, id: PlaneId) -> bool {
        self.node_opt(id).is_some()
    }

    /// True when `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: PlaneId, id: PlaneId) -> bool {
        let mut cursor = self.parent(id);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.parent(p);
        }
        false
    }

    // --- hooks and callbacks ---

    /// Install a [`Behavior`], replacing any previous one.
    pub fn set_behavior(&mut self, id: PlaneId, behavior: impl Behavior + 'static) {
        if let Some(n) = self.node_opt_mut(id) {
            n.behavior = Some(Box::new(behavior));
        }
    }

    /// Remove the plane's [`Behavior`], restoring the stock hooks.
    pub fn clear_behavior(&mut self, id: PlaneId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.behavior = None;
        }
    }

    /// Set the callback run by the stock `clicked` hook for `button`.
    pub fn set_click_handler(
        &mut self,
        id: PlaneId,
        button: ButtonName,
        handler: impl FnMut(&mut Self, PlaneId) + 'static,
    ) {
        if let Some(n) = self.node_opt_mut(id) {
            n.callbacks.click[button.index()] = Some(Box::new(handler));
        }
    }

    /// Set the callback run by the stock `dropped_upon` hook.
    pub fn set_drop_handler(
        &mut self,
        id: PlaneId,
        handler: impl FnMut(&mut Self, PlaneId, PlaneId, Point) + 'static,
    ) {
        if let Some(n) = self.node_opt_mut(id) {
            n.callbacks.dropped = Some(Box::new(handler));
        }
    }

    /// Set the callback run by the stock `hover_enter` hook.
    pub fn set_hover_enter_handler(
        &mut self,
        id: PlaneId,
        handler: impl FnMut(&mut Self, PlaneId) + 'static,
    ) {
        if let Some(n) = self.node_opt_mut(id) {
            n.callbacks.hover_enter = Some(Box::new(handler));
        }
    }

    /// Set the callback run by the stock `hover_exit` hook.
    pub fn set_hover_exit_handler(
        &mut self,
        id: PlaneId,
        handler: impl FnMut(&mut Self, PlaneId) + 'static,
    ) {
        if let Some(n) = self.node_opt_mut(id) {
            n.callbacks.hover_exit = Some(Box::new(handler));
        }
    }

    /// Run the `clicked` hook.
    pub fn clicked(&mut self, id: PlaneId, button: ButtonName) {
        if self
            .with_behavior(id, |b, t| b.clicked(t, id, button))
            .is_none()
        {
            self.default_clicked(id, button);
        }
    }

    /// Stock `clicked`: run the click callback registered for `button`, if any.
    pub fn default_clicked(&mut self, id: PlaneId, button: ButtonName) {
        self.run_plane_callback(id, PlaneSlot::Click(button));
    }

    /// Run the `dropped_upon` hook of `id` for `dropped` released at `point` (in `id`'s space).
    pub fn dropped_upon(
        &mut self,
        id: PlaneId,
        dropped: PlaneId,
        point: Point,
    ) -> Result<(), TreeError> {
        match self.with_behavior(id, |b, t| b.dropped_upon(t, id, dropped, point)) {
            Some(result) => result,
            None => self.default_dropped_upon(id, dropped, point),
        }
    }

    /// Stock `dropped_upon`.
    ///
    /// A plane with [`PlaneFlags::GRAB`] adopts `dropped` (unless it already is a child) and
    /// centers it on `point`. The drop callback runs afterwards whether or not the plane grabs.
    pub fn default_dropped_upon(
        &mut self,
        id: PlaneId,
        dropped: PlaneId,
        point: Point,
    ) -> Result<(), TreeError> {
        self.ensure_alive(dropped)?;
        let flags = self.node_opt(id).ok_or(StructuralError::StalePlane(id))?.flags;
        if flags.contains(PlaneFlags::GRAB) {
            if self.parent(dropped) != Some(id) {
                self.attach(id, dropped, None)?;
            }
            self.set_center(dropped, point);
        }

        let Some(mut handler) = self
            .node_opt_mut(id)
            .and_then(|n| n.callbacks.dropped.take())
        else {
            return Ok(());
        };
        handler(self, id, dropped, point);
        if let Some(n) = self.node_opt_mut(id)
            && n.callbacks.dropped.is_none()
        {
            n.callbacks.dropped = Some(handler);
        }
        Ok(())
    }

    /// Run the `keydown` hook.
    pub fn keydown(&mut self, id: PlaneId, key: &KeyEvent) {
        self.with_behavior(id, |b, t| b.keydown(t, id, key));
    }

    /// Run the `activate` hook.
    pub fn activate(&mut self, id: PlaneId) {
        self.with_behavior(id, |b, t| b.activate(t, id));
    }

    /// Run the `deactivate` hook.
    pub fn deactivate(&mut self, id: PlaneId) {
        self.with_behavior(id, |b, t| b.deactivate(t, id));
    }

    /// Run the `hover_enter` hook.
    pub fn hover_enter(&mut self, id: PlaneId) {
        if self.with_behavior(id, |b, t| b.hover_enter(t, id)).is_none() {
            self.default_hover_enter(id);
        }
    }

    /// Stock `hover_enter`: show the highlight if the plane has [`PlaneFlags::HIGHLIGHT`],
    /// then run the hover-enter callback.
    pub fn default_hover_enter(&mut self, id: PlaneId) {
        if let Some(n) = self.node_opt_mut(id)
            && n.flags.contains(PlaneFlags::HIGHLIGHT)
        {
            n.flags.insert(PlaneFlags::HOVER);
            n.cached_rect = None;
        }
        self.run_plane_callback(id, PlaneSlot::HoverEnter);
    }

    /// Run the `hover_exit` hook.
    pub fn hover_exit(&mut self, id: PlaneId) {
        if self.with_behavior(id, |b, t| b.hover_exit(t, id)).is_none() {
            self.default_hover_exit(id);
        }
    }

    /// Stock `hover_exit`: drop the highlight if it is shown, then run the hover-exit callback.
    pub fn default_hover_exit(&mut self, id: PlaneId) {
        // HIGHLIGHT is not consulted here; it may have been cleared while hovered.
        if let Some(n) = self.node_opt_mut(id)
            && n.flags.contains(PlaneFlags::HOVER)
        {
            n.flags.remove(PlaneFlags::HOVER);
            n.cached_rect = None;
        }
        self.run_plane_callback(id, PlaneSlot::HoverExit);
    }

    // --- per-frame logic ---

    /// Lock `id`'s position to `master`, keeping the current offset between their centers.
    pub fn sync(&mut self, id: PlaneId, master: PlaneId) -> Result<(), TreeError> {
        self.ensure_alive(id)?;
        self.ensure_alive(master)?;
        let offset = offset(center_of(self.node(master).rect), center_of(self.node(id).rect));
        self.node_mut(id).sync = Some(SyncLink { master, offset });
        debug!(plane = %id, %master, ?offset, "synced plane");
        Ok(())
    }

    /// Release the position lock set by [`Tree::sync`].
    pub fn unsync(&mut self, id: PlaneId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.sync = None;
        }
    }

    /// The plane `id` follows, if any.
    pub fn sync_master(&self, id: PlaneId) -> Option<PlaneId> {
        self.node_opt(id)?.sync.map(|s| s.master)
    }

    /// Run per-frame logic for the subtree rooted at `id`.
    ///
    /// For each plane: the `update` hook, then its children (over a snapshot of the child
    /// list, since hooks may restructure the tree), then its position sync.
    pub fn update(&mut self, id: PlaneId, stats: &mut Stats) {
        if !self.is_alive(id) {
            return;
        }
        stats.total_planes += 1;
        self.with_behavior(id, |b, t| b.update(t, id));
        for child in self.children(id) {
            self.update(child, stats);
        }
        self.apply_sync(id);
    }

    fn apply_sync(&mut self, id: PlaneId) {
        let Some(link) = self.node_opt(id).and_then(|n| n.sync) else {
            return;
        };
        match self.center(link.master) {
            Some(center) => self.set_center(id, center + link.offset),
            None => {
                debug!(plane = %id, master = %link.master, "sync master destroyed, unsyncing");
                self.unsync(id);
            }
        }
    }

    /// Find the plane under `point`, given in `id`'s local space.
    ///
    /// Returns the deepest plane whose rectangle contains the point, together with the point
    /// in that plane's space. Among overlapping siblings the one drawn last (on top) wins.
    /// A child whose rectangle misses the point is skipped with its whole subtree.
    pub fn plane_at(&self, id: PlaneId, point: Point) -> (PlaneId, Point) {
        let mut hit = (id, point);
        let Some(node) = self.node_opt(id) else {
            return hit;
        };
        for child in node.child_ids() {
            let rect = self.node(child).rect;
            if rect.contains(point) {
                hit = self.plane_at(child, point - rect.origin().to_vec2());
            }
        }
        hit
    }

    // --- internals ---

    fn ensure_alive(&self, id: PlaneId) -> Result<(), StructuralError> {
        if self.is_alive(id) {
            Ok(())
        } else {
            Err(StructuralError::StalePlane(id))
        }
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: PlaneId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling PlaneId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: PlaneId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling PlaneId")
    }

    pub(crate) fn node_opt(&self, id: PlaneId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: PlaneId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Remove `child` from `parent`'s children and reset the cache of the remaining siblings.
    fn unlink(&mut self, parent: PlaneId, child: PlaneId) {
        let name = self.node(child).name.clone();
        let p = self.node_mut(parent);
        if p.children.get(&name) != Some(&child) {
            return;
        }
        p.children.remove(&name);
        p.order.retain(|n| *n != name);
        // A removal may uncover anything beneath; every sibling is redrawn.
        let siblings: Vec<PlaneId> = p.children.values().copied().collect();
        for s in siblings {
            self.node_mut(s).cached_rect = None;
        }
        self.node_mut(child).parent = None;
    }

    fn with_behavior<R>(
        &mut self,
        id: PlaneId,
        hook: impl FnOnce(&mut Box<dyn Behavior>, &mut Self) -> R,
    ) -> Option<R> {
        let mut behavior = self.node_opt_mut(id)?.behavior.take()?;
        let out = hook(&mut behavior, self);
        if let Some(n) = self.node_opt_mut(id)
            && n.behavior.is_none()
        {
            n.behavior = Some(behavior);
        }
        Some(out)
    }

    fn run_plane_callback(&mut self, id: PlaneId, slot: PlaneSlot) {
        let Some(mut handler) = self
            .node_opt_mut(id)
            .and_then(|n| n.callbacks.plane_slot(slot).take())
        else {
            return;
        };
        handler(self, id);
        if let Some(n) = self.node_opt_mut(id) {
            let s = n.callbacks.plane_slot(slot);
            if s.is_none() {
                *s = Some(handler);
            }
        }
    }
}
