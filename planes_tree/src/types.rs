// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the plane tree: identifiers, flags, input names, and plane descriptions.

use kurbo::{Point, Rect};
use planes_surface::Surface;

use crate::geometry::pixel_size;

/// Identifier for a plane in the tree.
///
/// This is a small, copyable handle that stays stable while the plane lives and becomes
/// stale once the plane is destroyed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On destroy, the slot is freed; any existing `PlaneId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `PlaneId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check liveness. A stale `PlaneId` never
/// aliases a different live plane because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PlaneId(pub(crate) u32, pub(crate) u32);

impl PlaneId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for PlaneId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}v{}", self.0, self.1)
    }
}

bitflags::bitflags! {
    /// Per-plane interaction flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PlaneFlags: u8 {
        /// The plane can be picked up with the left button and dragged.
        const DRAGGABLE = 0b0000_0001;
        /// Planes dropped on this one are adopted as children.
        const GRAB      = 0b0000_0010;
        /// The plane lights up while the pointer is over it.
        const HIGHLIGHT = 0b0000_0100;
        /// The hover highlight is currently shown. Maintained by the hover hooks.
        const HOVER     = 0b0000_1000;
    }
}

/// Semantic name of a pointer button.
///
/// Wheel motion is reported as presses of [`ButtonName::WheelUp`] and [`ButtonName::WheelDown`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ButtonName {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel moved up.
    WheelUp,
    /// Wheel moved down.
    WheelDown,
}

impl ButtonName {
    /// All button names, in slot order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::WheelUp, Self::WheelDown];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::WheelUp => 2,
            Self::WheelDown => 3,
        }
    }
}

/// A key press routed to the focused plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Host key code.
    pub code: u32,
    /// Printable character produced by the key, if any.
    pub text: Option<char>,
}

impl KeyEvent {
    /// A key press without printable text.
    pub const fn new(code: u32) -> Self {
        Self { code, text: None }
    }

    /// A key press that produced `text`.
    pub const fn with_text(code: u32, text: char) -> Self {
        Self {
            code,
            text: Some(text),
        }
    }
}

/// Description of a plane to be inserted into a [`Tree`](crate::Tree).
///
/// The rectangle's size always matches the surface; the origin is relative to the parent.
#[derive(Clone, Debug)]
pub struct Plane {
    /// Name, unique among the siblings of the plane's eventual parent.
    pub name: String,
    /// Position of the top-left corner in parent space.
    pub origin: Point,
    /// The plane's own image.
    pub surface: Surface,
    /// Interaction flags.
    pub flags: PlaneFlags,
}

impl Plane {
    /// A plane covering `rect`, filled with opaque black.
    ///
    /// Fractional extents are rounded to whole pixels.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        let (width, height) = pixel_size(rect.size());
        Self {
            name: name.into(),
            origin: rect.origin(),
            surface: Surface::new(width, height),
            flags: PlaneFlags::empty(),
        }
    }

    /// A plane showing `surface`, placed at the parent origin.
    pub fn with_surface(name: impl Into<String>, surface: Surface) -> Self {
        Self {
            name: name.into(),
            origin: Point::ZERO,
            surface,
            flags: PlaneFlags::empty(),
        }
    }

    /// Place the top-left corner at `origin`.
    pub fn at(mut self, origin: impl Into<Point>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Add interaction flags.
    pub fn flags(mut self, flags: PlaneFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Mark the plane as draggable.
    pub fn draggable(self) -> Self {
        self.flags(PlaneFlags::DRAGGABLE)
    }

    /// Let the plane adopt planes dropped on it.
    pub fn grab(self) -> Self {
        self.flags(PlaneFlags::GRAB)
    }

    /// Highlight the plane while hovered.
    pub fn highlight(self) -> Self {
        self.flags(PlaneFlags::HIGHLIGHT)
    }

    /// Rectangle implied by origin and surface size.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            (
                f64::from(self.surface.width()),
                f64::from(self.surface.height()),
            ),
        )
    }
}

/// A child addressed either by name or by identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChildRef<'a> {
    /// Sibling-unique name.
    Name(&'a str),
    /// Plane identifier.
    Id(PlaneId),
}

impl<'a> From<&'a str> for ChildRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for ChildRef<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl From<PlaneId> for ChildRef<'_> {
    fn from(id: PlaneId) -> Self {
        Self::Id(id)
    }
}
