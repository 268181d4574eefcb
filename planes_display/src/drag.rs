// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use planes_surface::Surface;
use planes_tree::PlaneId;

/// Translucent stand-in for a plane being dragged.
///
/// It lives outside the tree, drawn on top of the presented frame and centered on the pointer.
#[derive(Clone, Debug)]
pub(crate) struct Ghost {
    pub(crate) source: PlaneId,
    pub(crate) rect: Rect,
    pub(crate) surface: Surface,
}

/// Drag and drop state: `Idle -> Dragging -> Idle`.
#[derive(Clone, Debug, Default)]
pub(crate) enum DragState {
    #[default]
    Idle,
    Dragging(Ghost),
}

impl DragState {
    pub(crate) fn ghost(&self) -> Option<&Ghost> {
        match self {
            Self::Idle => None,
            Self::Dragging(ghost) => Some(ghost),
        }
    }

    pub(crate) fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}
