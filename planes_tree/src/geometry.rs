// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel-grid helpers over Kurbo rectangles.
//!
//! Plane rectangles live on the integer pixel grid. Centers follow the same convention as
//! the origin: for odd extents the center is the pixel left of (or above) the midpoint, so
//! `centered_at(r, center_of(r)) == r` always holds.

use kurbo::{Point, Rect, Size, Vec2};

/// True when the two rectangles overlap by a non-empty area.
pub fn collide(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Center of a pixel rectangle.
pub fn center_of(rect: Rect) -> Point {
    Point::new(
        rect.x0 + (rect.width() / 2.0).floor(),
        rect.y0 + (rect.height() / 2.0).floor(),
    )
}

/// Move `rect` so that [`center_of`] returns `center`.
pub fn centered_at(rect: Rect, center: Point) -> Rect {
    let origin = Point::new(
        center.x - (rect.width() / 2.0).floor(),
        center.y - (rect.height() / 2.0).floor(),
    );
    rect.with_origin(origin)
}

/// Express `rect`, given in parent space, relative to `origin`.
pub fn to_local(rect: Rect, origin: Point) -> Rect {
    rect - origin.to_vec2()
}

/// Offset between two points.
pub fn offset(from: Point, to: Point) -> Vec2 {
    to - from
}

/// Whole-pixel top-left corner for blitting.
pub fn pixel_origin(rect: Rect) -> (i32, i32) {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Plane positions are far inside the i32 range."
    )]
    let origin = (rect.x0.round() as i32, rect.y0.round() as i32);
    origin
}

/// Whole-pixel extent of a size; negative extents collapse to zero.
pub fn pixel_size(size: Size) -> (u32, u32) {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Extents are clamped to non-negative and plane sizes fit in u32."
    )]
    let size = (
        size.width.round().max(0.0) as u32,
        size.height.round().max(0.0) as u32,
    );
    size
}
