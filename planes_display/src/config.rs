// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;

use planes_surface::Color;
use planes_tree::{ButtonName, DEFAULT_WINDOW};

use crate::event::keycode;

/// Settings of a [`Display`](crate::Display).
///
/// With the `serde` feature this can be loaded from any serde format; missing fields take
/// their [`Default`] values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Width of the display in pixels.
    pub width: u32,
    /// Height of the display in pixels.
    pub height: u32,
    /// Host button codes the display reacts to. Unmapped buttons are ignored.
    pub button_map: BTreeMap<u8, ButtonName>,
    /// Key code toggling the statistics overlay.
    pub stats_key: u32,
    /// Surface alpha of the drag ghost.
    pub ghost_alpha: u8,
    /// Number of render timings in the rolling mean.
    pub stats_window: usize,
    /// Fill color of the root plane.
    pub background: Color,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            button_map: BTreeMap::from([
                (1, ButtonName::Left),
                (3, ButtonName::Right),
                (4, ButtonName::WheelUp),
                (5, ButtonName::WheelDown),
            ]),
            stats_key: keycode::F12,
            ghost_alpha: 170,
            stats_window: DEFAULT_WINDOW,
            background: Color::BLACK,
        }
    }
}

impl DisplayConfig {
    /// Default settings for a display of the given size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// The semantic name of a host button code.
    pub fn button(&self, code: u8) -> Option<ButtonName> {
        self.button_map.get(&code).copied()
    }
}
