// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Statistics overlay panel.

use planes_surface::{Color, Surface};

use crate::host::Host;

/// Top-left corner of the panel in display coordinates.
pub const PANEL_ORIGIN: (i32, i32) = (10, 10);
/// Panel extent in pixels.
pub const PANEL_SIZE: (u32, u32) = (320, 256);

const PANEL_FILL: Color = Color::rgb(64, 64, 64);
const PANEL_ALPHA: u8 = 196;
const PADDING: i32 = 5;
const FIRST_LINE: i32 = 3;
const LINE_HEIGHT: i32 = 16 + PADDING;

/// Blend the panel with `lines` of text onto `frame`.
pub(crate) fn draw(frame: &mut Surface, lines: &[String], host: &dyn Host) {
    let mut panel = Surface::new(PANEL_SIZE.0, PANEL_SIZE.1);
    panel.fill(PANEL_FILL);
    let mut y = FIRST_LINE;
    for line in lines {
        host.draw_text(&mut panel, PADDING, y, line);
        y += LINE_HEIGHT;
    }
    panel.set_alpha(Some(PANEL_ALPHA));
    frame.blit(&panel, PANEL_ORIGIN.0, PANEL_ORIGIN.1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::VirtualPointer;

    #[test]
    fn panel_darkens_only_its_area() {
        let mut frame = Surface::new(400, 300);
        frame.fill(Color::WHITE);
        draw(&mut frame, &[], &VirtualPointer::new());
        let inside = frame.pixel(20, 20).unwrap();
        assert!(inside.r < 255 && inside.r > 64, "blended: {inside:?}");
        assert_eq!(frame.pixel(5, 5), Some(Color::WHITE));
        assert_eq!(frame.pixel(340, 20), Some(Color::WHITE));
    }
}
