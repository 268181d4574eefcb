// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment a [`Display`](crate::Display) runs in.

use kurbo::Point;
use planes_surface::Surface;

/// The host window system went away.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Pointer state can no longer be queried, usually because the host shut down.
    #[error("host display is unavailable")]
    Unavailable,
}

/// Live queries the display makes of its host while processing a frame.
pub trait Host {
    /// Current pointer position in display coordinates.
    fn pointer_position(&self) -> Result<Point, HostError>;

    /// Whether any pointer button is held right now.
    fn any_button_pressed(&self) -> Result<bool, HostError>;

    /// Draw one line of text with its top-left corner at `(x, y)`.
    ///
    /// Used by the statistics overlay. Hosts without a font renderer keep the default,
    /// which draws nothing.
    fn draw_text(&self, target: &mut Surface, x: i32, y: i32, text: &str) {
        let _ = (target, x, y, text);
    }
}

/// In-memory [`Host`] driven by the caller: headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct VirtualPointer {
    position: Point,
    pressed: bool,
    shut_down: bool,
}

impl VirtualPointer {
    /// A pointer at the origin with no button held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the pointer.
    pub fn move_to(&mut self, position: impl Into<Point>) {
        self.position = position.into();
    }

    /// Hold a button down.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Release all buttons.
    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Make every later query fail with [`HostError::Unavailable`].
    pub fn shut_down(&mut self) {
        self.shut_down = true;
    }

    fn check(&self) -> Result<(), HostError> {
        if self.shut_down {
            Err(HostError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl Host for VirtualPointer {
    fn pointer_position(&self) -> Result<Point, HostError> {
        self.check()?;
        Ok(self.position)
    }

    fn any_button_pressed(&self) -> Result<bool, HostError> {
        self.check()?;
        Ok(self.pressed)
    }
}
