// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planes Display: the root of a plane tree and its per-frame input pipeline.
//!
//! A [`Display`] owns a [`planes_tree::Tree`] whose root plane covers the whole display, a
//! presentation frame, and the interaction state that spans frames:
//!
//! - click dispatch to the plane under the pointer, per semantic button,
//! - drag and drop of draggable planes through a translucent ghost,
//! - keyboard focus routing,
//! - hover tracking,
//! - a statistics overlay toggled by a reserved key.
//!
//! The host owns the window. It feeds [`Event`]s into [`Display::process`], answers live
//! pointer queries through the [`Host`] trait, and presents [`Display::frame`] whenever
//! [`Display::render`] reports a new frame.
//!
//! ## Frame loop
//!
//! ```
//! use kurbo::{Point, Rect};
//! use planes_display::{Display, Event, VirtualPointer};
//! use planes_tree::Plane;
//!
//! let mut display = Display::new(320, 240);
//! let card = display
//!     .insert(Plane::new("card", Rect::new(10.0, 10.0, 50.0, 70.0)).draggable())
//!     .unwrap();
//! let target = display
//!     .insert(Plane::new("pile", Rect::new(100.0, 100.0, 200.0, 200.0)).grab())
//!     .unwrap();
//!
//! let mut pointer = VirtualPointer::new();
//! let frames = [
//!     vec![Event::ButtonDown { button: 1, position: Point::new(20.0, 20.0) }],
//!     vec![Event::ButtonUp { button: 1, position: Point::new(150.0, 150.0) }],
//! ];
//! for events in &frames {
//!     pointer.press();
//!     display.process(events, &pointer).unwrap();
//!     display.update();
//!     if display.render(&pointer) {
//!         // Present `display.frame()` here.
//!     }
//! }
//! assert_eq!(display.tree().parent(card), Some(target));
//! ```
//!
//! Diagnostics go through `tracing`; install a subscriber to see drag, focus and overlay
//! activity.

mod config;
mod display;
mod drag;
mod event;
mod host;
pub mod hover;
mod overlay;

pub use config::DisplayConfig;
pub use display::{Display, ROOT_NAME};
pub use event::{Event, keycode};
pub use host::{Host, HostError, VirtualPointer};
pub use overlay::{PANEL_ORIGIN, PANEL_SIZE};
