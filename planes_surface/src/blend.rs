// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pixel integer blend math.

use crate::Color;

/// `a * b / 255`, rounded to nearest.
#[inline]
pub(crate) fn mul_div255(a: u8, b: u8) -> u8 {
    let t = u32::from(a) * u32::from(b) + 128;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The result of the rounding division is at most 255."
    )]
    let v = ((t + (t >> 8)) >> 8) as u8;
    v
}

/// Source-over blend of `src` with coverage `alpha` onto `dst`.
///
/// When `keep_dst_alpha` is set the destination is treated as opaque and its alpha is left alone.
#[inline]
pub(crate) fn over(dst: Color, src: Color, alpha: u8, keep_dst_alpha: bool) -> Color {
    if alpha == 255 {
        return if keep_dst_alpha {
            src.with_alpha(dst.a)
        } else {
            src.with_alpha(255)
        };
    }
    if alpha == 0 {
        return dst;
    }
    let inv = 255 - alpha;
    let a = if keep_dst_alpha {
        dst.a
    } else {
        alpha.saturating_add(mul_div255(dst.a, inv))
    };
    Color {
        r: mul_div255(src.r, alpha).saturating_add(mul_div255(dst.r, inv)),
        g: mul_div255(src.g, alpha).saturating_add(mul_div255(dst.g, inv)),
        b: mul_div255(src.b, alpha).saturating_add(mul_div255(dst.b, inv)),
        a,
    }
}

/// Saturating additive blend of the color channels. Destination alpha is kept.
#[inline]
pub(crate) fn add(dst: Color, src: Color) -> Color {
    Color {
        r: dst.r.saturating_add(src.r),
        g: dst.g.saturating_add(src.g),
        b: dst.b.saturating_add(src.b),
        a: dst.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div255_edges() {
        assert_eq!(mul_div255(255, 255), 255);
        assert_eq!(mul_div255(0, 255), 0);
        assert_eq!(mul_div255(255, 0), 0);
        assert_eq!(mul_div255(128, 255), 128);
        assert_eq!(mul_div255(128, 128), 64);
    }

    #[test]
    fn over_half_alpha_mixes() {
        let out = over(Color::BLACK, Color::rgb(200, 100, 50), 128, true);
        assert_eq!(out, Color::rgb(100, 50, 25));
    }

    #[test]
    fn over_keeps_opaque_destination_alpha() {
        let dst = Color::rgba(10, 10, 10, 255);
        let out = over(dst, Color::rgba(0, 0, 0, 0), 100, true);
        assert_eq!(out.a, 255, "opaque destinations stay opaque");
    }

    #[test]
    fn over_accumulates_alpha_on_transparent_destination() {
        let out = over(Color::TRANSPARENT, Color::rgb(255, 0, 0), 128, false);
        assert_eq!(out.a, 128);
        assert_eq!(out.r, 128);
    }

    #[test]
    fn add_saturates() {
        let out = add(Color::rgb(200, 10, 0), Color::rgba(100, 10, 0, 7));
        assert_eq!(out, Color::rgb(255, 20, 0));
    }
}
