// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Instant;

use kurbo::{Point, Rect};
use planes_surface::Surface;
use planes_tree::{
    ButtonName, Plane, PlaneFlags, PlaneId, Stats, Tree, TreeError, centered_at, pixel_origin,
};
use tracing::{debug, warn};

use crate::config::DisplayConfig;
use crate::drag::{DragState, Ghost};
use crate::event::Event;
use crate::host::Host;
use crate::hover::{HoverEvent, HoverState};
use crate::overlay;

/// Name of the root plane.
pub const ROOT_NAME: &str = "display";

/// The root of a plane tree, bound to a presentation frame and fed with host input.
///
/// Frame protocol: [`Display::process`] the frame's events, [`Display::update`] the tree,
/// [`Display::render`] and, when that returns `true`, present [`Display::frame`].
pub struct Display {
    tree: Tree,
    root: PlaneId,
    frame: Surface,
    config: DisplayConfig,
    stats: Stats,
    show_stats: bool,
    force: bool,
    quit: bool,
    focus: Option<PlaneId>,
    hover: HoverState<PlaneId>,
    drag: DragState,
    report: Vec<String>,
}

impl core::fmt::Debug for Display {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Display")
            .field("tree", &self.tree)
            .field("root", &self.root)
            .field("config", &self.config)
            .field("show_stats", &self.show_stats)
            .field("focus", &self.focus)
            .field("hover", &self.hover)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl Display {
    /// A display of the given size with default settings.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(DisplayConfig::with_size(width, height))
    }

    /// A display built from `config`.
    pub fn with_config(config: DisplayConfig) -> Self {
        let mut tree = Tree::new();
        let mut surface = Surface::new(config.width, config.height);
        surface.fill(config.background);
        let root = tree.insert_detached(Plane::with_surface(ROOT_NAME, surface));
        let mut frame = Surface::new(config.width, config.height);
        frame.fill(config.background);
        Self {
            tree,
            root,
            frame,
            stats: Stats::new(config.stats_window),
            config,
            show_stats: false,
            force: false,
            quit: false,
            focus: None,
            hover: HoverState::new(),
            drag: DragState::Idle,
            report: Vec::new(),
        }
    }

    /// The plane tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the plane tree.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The root plane, covering the whole display.
    pub fn root(&self) -> PlaneId {
        self.root
    }

    /// Settings this display was built with.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// The presentation frame written by [`Display::render`].
    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    /// Statistics of the current frame.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Whether the statistics overlay is shown.
    pub fn show_stats(&self) -> bool {
        self.show_stats
    }

    /// Show or hide the statistics overlay.
    pub fn set_show_stats(&mut self, show: bool) {
        if show != self.show_stats {
            self.show_stats = show;
            self.force = true;
            debug!(show, "statistics overlay toggled");
        }
    }

    /// Report lines shown by the overlay during the last render, empty while it is off.
    pub fn last_report(&self) -> &[String] {
        &self.report
    }

    /// Whether a quit event has been received.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// The plane receiving key presses.
    pub fn focus(&self) -> Option<PlaneId> {
        self.focus
    }

    /// The plane under the pointer, as of the last hover step.
    pub fn hovered(&self) -> Option<PlaneId> {
        self.hover.current()
    }

    /// The plane being dragged.
    pub fn dragged(&self) -> Option<PlaneId> {
        self.drag.ghost().map(|g| g.source)
    }

    /// Display-space rectangle of the drag ghost as last drawn.
    pub fn ghost_rect(&self) -> Option<Rect> {
        self.drag.ghost().map(|g| g.rect)
    }

    /// Insert a plane as a child of the root.
    pub fn insert(&mut self, plane: Plane) -> Result<PlaneId, TreeError> {
        self.tree.insert(Some(self.root), plane)
    }

    /// Hit-test in display coordinates. See [`Tree::plane_at`].
    pub fn plane_at(&self, point: Point) -> (PlaneId, Point) {
        self.tree.plane_at(self.root, point)
    }

    /// Give `plane` the keyboard focus.
    ///
    /// The previous focus is deactivated before the new one is activated.
    pub fn set_focus(&mut self, plane: PlaneId) {
        if let Some(previous) = self.focus.replace(plane) {
            self.tree.deactivate(previous);
        }
        debug!(%plane, "focus changed");
        self.tree.activate(plane);
    }

    /// Drop the keyboard focus, deactivating the focused plane.
    pub fn clear_focus(&mut self) {
        if let Some(previous) = self.focus.take() {
            self.tree.deactivate(previous);
        }
    }

    /// Run the input pipeline over one frame's events.
    ///
    /// - Presses of mapped buttons click the plane under the pointer (never the root) and a
    ///   left press on a draggable plane starts dragging a ghost of it.
    /// - A left release while dragging drops the plane on whatever is under the pointer,
    ///   unless that is the dragged plane itself.
    /// - The statistics key toggles the overlay; other keys go to the focused plane while it
    ///   is attached to a parent.
    /// - When none of the above happened, hover is tracked at the host's pointer position.
    ///
    /// Events after one whose drop fails are not processed.
    pub fn process(&mut self, events: &[Event], host: &dyn Host) -> Result<(), TreeError> {
        let mut nothing_happened = true;
        for event in events {
            match event {
                Event::ButtonDown { button, position } => {
                    let Some(name) = self.config.button(*button) else {
                        continue;
                    };
                    nothing_happened = false;
                    self.button_down(name, *position);
                }
                Event::ButtonUp { button, position } => {
                    if self.config.button(*button) == Some(ButtonName::Left) {
                        nothing_happened = false;
                        self.left_up(*position)?;
                    }
                }
                Event::KeyDown(key) if key.code == self.config.stats_key => {
                    self.set_show_stats(!self.show_stats);
                }
                Event::KeyDown(key) => {
                    if let Some(focus) = self.routable_focus() {
                        nothing_happened = false;
                        self.tree.keydown(focus, key);
                    }
                }
                Event::Quit => {
                    debug!("quit requested");
                    self.quit = true;
                }
                Event::Motion { .. } => {}
            }
        }
        if nothing_happened {
            self.track_hover(host);
        }
        Ok(())
    }

    fn button_down(&mut self, button: ButtonName, position: Point) {
        let (plane, _) = self.plane_at(position);
        if plane == self.root {
            return;
        }
        self.tree.clicked(plane, button);
        if button != ButtonName::Left {
            return;
        }
        // The click hook may have destroyed the plane or cleared its flag.
        let draggable = self
            .tree
            .flags(plane)
            .is_some_and(|f| f.contains(PlaneFlags::DRAGGABLE));
        if let (true, Some(rect), Some(image)) =
            (draggable, self.tree.rect(plane), self.tree.composite(plane))
        {
            let mut surface = image.clone();
            surface.set_alpha(Some(self.config.ghost_alpha));
            debug!(%plane, "drag started");
            self.drag = DragState::Dragging(Ghost {
                source: plane,
                rect,
                surface,
            });
        }
    }

    fn left_up(&mut self, position: Point) -> Result<(), TreeError> {
        let DragState::Dragging(ghost) = core::mem::take(&mut self.drag) else {
            return Ok(());
        };
        self.force = true;
        let (target, local) = self.plane_at(position);
        if target == ghost.source || !self.tree.is_alive(ghost.source) {
            debug!(plane = %ghost.source, "drag cancelled");
            return Ok(());
        }
        debug!(plane = %ghost.source, %target, ?local, "dropped");
        self.tree.dropped_upon(target, ghost.source, local)
    }

    fn routable_focus(&self) -> Option<PlaneId> {
        self.focus
            .filter(|&f| self.tree.is_alive(f) && self.tree.parent(f).is_some())
    }

    fn track_hover(&mut self, host: &dyn Host) {
        let position = match host.pointer_position() {
            Ok(p) => p,
            Err(err) => {
                warn!(%err, "pointer unavailable, skipping hover tracking");
                return;
            }
        };
        let (plane, _) = self.plane_at(position);
        let target = (plane != self.root).then_some(plane);
        for transition in self.hover.update(target) {
            match transition {
                HoverEvent::Leave(p) => self.tree.hover_exit(p),
                HoverEvent::Enter(p) => self.tree.hover_enter(p),
            }
        }
    }

    /// Run the per-frame logic of every plane. See [`Tree::update`].
    pub fn update(&mut self) {
        self.stats.begin_update();
        self.tree.update(self.root, &mut self.stats);
    }

    /// Render the tree and refresh the presentation frame.
    ///
    /// The root composite is copied into the frame when it changed, after a drop or overlay
    /// toggle, and on every frame while dragging or showing statistics. The drag ghost is
    /// drawn centered on the pointer as long as the host reports a held button; once it does
    /// not, the ghost is discarded without a drop.
    ///
    /// Returns whether the frame was presented anew.
    pub fn render(&mut self, host: &dyn Host) -> bool {
        self.stats.begin_render();
        let viewport = self.viewport();
        let started = Instant::now();
        let changed = self.tree.render(self.root, Some(viewport), &mut self.stats);
        self.stats.record_render_time(started.elapsed());

        let present = changed || self.force || self.show_stats || self.drag.is_dragging();
        self.force = false;
        if !present {
            return false;
        }

        if let Some(composite) = self.tree.composite(self.root) {
            self.frame.blit(composite, 0, 0);
        }
        self.draw_ghost(host);

        if self.show_stats {
            self.report = self.stats.report();
            overlay::draw(&mut self.frame, &self.report, host);
            debug!(report = ?self.report, "statistics");
            self.stats.reset();
        } else {
            self.report.clear();
        }
        true
    }

    fn draw_ghost(&mut self, host: &dyn Host) {
        let DragState::Dragging(ghost) = &mut self.drag else {
            return;
        };
        let pointer = match host.any_button_pressed() {
            Ok(true) => host.pointer_position(),
            Ok(false) => {
                debug!(plane = %ghost.source, "button released unseen, discarding ghost");
                self.drag = DragState::Idle;
                return;
            }
            Err(err) => Err(err),
        };
        match pointer {
            Ok(p) => {
                ghost.rect = centered_at(ghost.rect, p);
                let (x, y) = pixel_origin(ghost.rect);
                self.frame.blit(&ghost.surface, x, y);
            }
            Err(err) => {
                warn!(%err, "pointer unavailable, discarding drag ghost");
                self.drag = DragState::Idle;
            }
        }
    }

    /// The root rectangle clamped to the frame.
    fn viewport(&self) -> Rect {
        let size = self.tree.rect(self.root).map_or(kurbo::Size::ZERO, |r| r.size());
        Rect::new(
            0.0,
            0.0,
            size.width.min(f64::from(self.frame.width())),
            size.height.min(f64::from(self.frame.height())),
        )
    }
}
