// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Surface`] pixel buffer and its blit operations.

use crate::Color;
use crate::blend::{add, mul_div255, over};

bitflags::bitflags! {
    /// Surface format flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SurfaceFlags: u8 {
        /// Pixels carry a meaningful alpha channel.
        const PER_PIXEL_ALPHA = 0b0000_0001;
    }
}

/// Errors raised when constructing a surface from raw pixels.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The pixel vector does not match the requested dimensions.
    #[error("pixel buffer holds {actual} pixels, a {width}x{height} surface needs {expected}")]
    SizeMismatch {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}

/// An owned, row-major RGBA pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    flags: SurfaceFlags,
    alpha: Option<u8>,
}

impl core::fmt::Debug for Surface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("flags", &self.flags)
            .field("alpha", &self.alpha)
            .finish_non_exhaustive()
    }
}

/// Overlap between a source placed at an offset and a destination.
#[derive(Clone, Copy, Debug)]
struct Span {
    src_x: usize,
    src_y: usize,
    dst_x: usize,
    dst_y: usize,
    width: usize,
    height: usize,
}

impl Surface {
    /// Create an opaque surface filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; Self::len_for(width, height)],
            flags: SurfaceFlags::empty(),
            alpha: None,
        }
    }

    /// Create a fully transparent surface with per-pixel alpha.
    pub fn new_transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; Self::len_for(width, height)],
            flags: SurfaceFlags::PER_PIXEL_ALPHA,
            alpha: None,
        }
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: Vec<Color>,
        flags: SurfaceFlags,
    ) -> Result<Self, SurfaceError> {
        let expected = Self::len_for(width, height);
        if pixels.len() != expected {
            return Err(SurfaceError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            flags,
            alpha: None,
        })
    }

    fn len_for(width: u32, height: u32) -> usize {
        width as usize * height as usize
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Format flags.
    pub fn flags(&self) -> SurfaceFlags {
        self.flags
    }

    /// True when the alpha channel of each pixel is meaningful.
    pub fn has_per_pixel_alpha(&self) -> bool {
        self.flags.contains(SurfaceFlags::PER_PIXEL_ALPHA)
    }

    /// Surface-wide alpha applied when this surface is blitted as a source.
    pub fn alpha(&self) -> Option<u8> {
        self.alpha
    }

    /// Set or clear the surface-wide alpha.
    pub fn set_alpha(&mut self, alpha: Option<u8>) {
        self.alpha = alpha;
    }

    /// Row-major pixel slice.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable row-major pixel slice.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Read a pixel; `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write a pixel. Returns false (and does nothing) outside the surface.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Fill the whole surface with one color.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let Some(span) = self.clip(x, y, width, height) else {
            return;
        };
        let stride = self.width as usize;
        for row in 0..span.height {
            let start = (span.dst_y + row) * stride + span.dst_x;
            self.pixels[start..start + span.width].fill(color);
        }
    }

    /// Compute the overlap of a `width`×`height` source placed at (`x`, `y`).
    fn clip(&self, x: i32, y: i32, width: u32, height: u32) -> Option<Span> {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "All values are clamped into the u32 surface extents."
        )]
        let span = Span {
            src_x: (x0 - i64::from(x)) as usize,
            src_y: (y0 - i64::from(y)) as usize,
            dst_x: x0 as usize,
            dst_y: y0 as usize,
            width: (x1 - x0) as usize,
            height: (y1 - y0) as usize,
        };
        Some(span)
    }

    fn for_each_overlap(
        &mut self,
        src: &Self,
        x: i32,
        y: i32,
        mut op: impl FnMut(Color, Color) -> Color,
    ) {
        let Some(span) = self.clip(x, y, src.width, src.height) else {
            return;
        };
        let dst_stride = self.width as usize;
        let src_stride = src.width as usize;
        for row in 0..span.height {
            let d = (span.dst_y + row) * dst_stride + span.dst_x;
            let s = (span.src_y + row) * src_stride + span.src_x;
            let dst_row = &mut self.pixels[d..d + span.width];
            let src_row = &src.pixels[s..s + span.width];
            for (dp, sp) in dst_row.iter_mut().zip(src_row) {
                *dp = op(*dp, *sp);
            }
        }
    }

    /// Source-over composite `src` with its top-left corner at (`x`, `y`).
    ///
    /// The source coverage is its per-pixel alpha (if it has one) scaled by its surface alpha.
    /// Opaque destinations keep their alpha; destinations with per-pixel alpha accumulate it.
    pub fn blit(&mut self, src: &Self, x: i32, y: i32) {
        let surface_alpha = src.alpha.unwrap_or(255);
        let per_pixel = src.has_per_pixel_alpha();
        let keep_dst_alpha = !self.has_per_pixel_alpha();
        self.for_each_overlap(src, x, y, |d, s| {
            let a = if per_pixel {
                mul_div255(s.a, surface_alpha)
            } else {
                surface_alpha
            };
            over(d, s, a, keep_dst_alpha)
        });
    }

    /// Add the color channels of `src` onto this surface, saturating at white.
    pub fn blit_add(&mut self, src: &Self, x: i32, y: i32) {
        self.for_each_overlap(src, x, y, add);
    }

    /// Multiply every color channel by itself.
    pub fn multiply_self(&mut self) {
        for p in &mut self.pixels {
            p.r = mul_div255(p.r, p.r);
            p.g = mul_div255(p.g, p.g);
            p.b = mul_div255(p.b, p.b);
        }
    }

    /// Return a copy whose color channels are multiplied by the pixel alpha.
    pub fn premultiplied(&self) -> Self {
        let mut out = self.clone();
        for p in &mut out.pixels {
            p.r = mul_div255(p.r, p.a);
            p.g = mul_div255(p.g, p.a);
            p.b = mul_div255(p.b, p.a);
        }
        out
    }

    /// Build the hover highlight for this surface.
    ///
    /// The overlay is the surface multiplied by itself twice (after premultiplying when it has
    /// per-pixel alpha, so that invisible pixels add nothing). Apply it with [`Surface::blit_add`].
    pub fn highlight_overlay(&self) -> Self {
        let mut overlay = if self.has_per_pixel_alpha() {
            self.premultiplied()
        } else {
            self.clone()
        };
        overlay.alpha = None;
        overlay.multiply_self();
        overlay.multiply_self();
        overlay
    }
}
