// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use planes_tree::KeyEvent;

/// Input event delivered by the host, in display coordinates.
///
/// Button codes are raw host codes; [`DisplayConfig::button_map`](crate::DisplayConfig::button_map)
/// decides which of them mean anything.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A pointer button was pressed (wheel motion arrives as presses too).
    ButtonDown {
        /// Host button code.
        button: u8,
        /// Pointer position.
        position: Point,
    },
    /// A pointer button was released.
    ButtonUp {
        /// Host button code.
        button: u8,
        /// Pointer position.
        position: Point,
    },
    /// The pointer moved. Hover is tracked from the host's pointer state instead.
    Motion {
        /// Pointer position.
        position: Point,
    },
    /// A key was pressed.
    KeyDown(KeyEvent),
    /// The user asked to close the application.
    Quit,
}

/// Host key codes the display knows about.
pub mod keycode {
    /// F12, the default statistics overlay toggle.
    pub const F12: u32 = 0x4000_0045;
}
