// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planes Surface: owned RGBA pixel buffers for software compositing.
//!
//! A [`Surface`] is a rectangular grid of [`Color`] pixels.
//! It is the unit of storage for the Planes scene graph: each plane owns one surface for its
//! own image and, once it has children, a second one for the composite of its subtree.
//!
//! ## Alpha model
//!
//! - A surface either carries a per-pixel alpha channel ([`SurfaceFlags::PER_PIXEL_ALPHA`])
//!   or is opaque, in which case the alpha component of its pixels is ignored when it is used as a source.
//! - Independently, a surface may carry a surface-wide alpha ([`Surface::set_alpha`]) which
//!   scales every source pixel during [`Surface::blit`]. This is how drag ghosts become translucent.
//!
//! ## Blend operations
//!
//! - [`Surface::blit`]: source-over composition, clipped to the destination.
//! - [`Surface::blit_add`]: saturating per-channel addition.
//! - [`Surface::multiply_self`]: squares every color channel, darkening mid tones.
//! - [`Surface::premultiplied`]: folds the alpha channel into the color channels.
//! - [`Surface::highlight_overlay`]: the hover highlight used by the compositor.
//!
//! ## Minimal usage
//!
//! ```
//! use planes_surface::{Color, Surface};
//!
//! let mut dst = Surface::new(4, 4);
//! let mut src = Surface::new(2, 2);
//! src.fill(Color::rgb(200, 0, 0));
//!
//! dst.blit(&src, 1, 1);
//! assert_eq!(dst.pixel(1, 1), Some(Color::rgb(200, 0, 0)));
//! assert_eq!(dst.pixel(0, 0), Some(Color::BLACK));
//! ```

mod blend;
mod color;
mod surface;

pub use color::Color;
pub use surface::{Surface, SurfaceError, SurfaceFlags};
