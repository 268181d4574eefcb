// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering statistics.
//!
//! A [`Stats`] value is owned by whoever drives the frame loop and passed by `&mut` into
//! [`Tree::update`](crate::Tree::update) and [`Tree::render`](crate::Tree::render).
//! The counters are for observation only and never influence what gets drawn.

use std::collections::VecDeque;
use std::time::Duration;

/// Default number of render timings kept for the rolling mean.
pub const DEFAULT_WINDOW: usize = 30;

/// Per-frame counters and rolling render timing.
#[derive(Clone, Debug)]
pub struct Stats {
    /// Planes visited by the last update pass.
    pub total_planes: u64,
    /// Pixel area touched by rendering (own buffer plus composite for planes with children).
    pub total_pixels: u64,
    /// Planes whose composite was reused as-is.
    pub unchanged_planes: u64,
    /// Children not rendered because they lie outside the viewport.
    pub render_skip: u64,
    /// Children not blitted because they lie outside the viewport.
    pub blit_skip: u64,
    render_time: Duration,
    samples: VecDeque<Duration>,
    window: usize,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Stats {
    /// Create zeroed statistics averaging over the last `window` renders.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            total_planes: 0,
            total_pixels: 0,
            unchanged_planes: 0,
            render_skip: 0,
            blit_skip: 0,
            render_time: Duration::ZERO,
            samples: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Zero the counters filled in by rendering.
    pub fn begin_render(&mut self) {
        self.total_pixels = 0;
        self.unchanged_planes = 0;
        self.render_skip = 0;
        self.blit_skip = 0;
    }

    /// Zero the counter filled in by the update pass.
    pub fn begin_update(&mut self) {
        self.total_planes = 0;
    }

    /// Zero every frame counter. Timing samples are kept.
    pub fn reset(&mut self) {
        self.begin_update();
        self.begin_render();
    }

    /// Record the duration of one render and push it into the rolling window.
    pub fn record_render_time(&mut self, elapsed: Duration) {
        self.render_time = elapsed;
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(elapsed);
    }

    /// Duration of the most recent render.
    pub fn render_time(&self) -> Duration {
        self.render_time
    }

    /// Mean of the retained render durations, zero before the first sample.
    pub fn mean_render_time(&self) -> Duration {
        let n = self.samples.len();
        if n == 0 {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "The window is a small configured sample count."
        )]
        let mean = total / n as u32;
        mean
    }

    /// How many renders per second the mean render time would allow, in theory.
    ///
    /// This is not the frame rate, which is decided by the host loop.
    pub fn renders_per_second(&self) -> u64 {
        let mean = self.mean_render_time().as_secs_f64();
        if mean > 0.0 {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "A positive finite reciprocal, truncated like an integer rate."
            )]
            let rate = (1.0 / mean) as u64;
            rate
        } else {
            0
        }
    }

    /// Human-readable report lines, as shown by the statistics overlay.
    pub fn report(&self) -> Vec<String> {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Display-only megapixel figures."
        )]
        let pixels = self.total_pixels as f64;
        vec![
            format!("Planes {} runtime statistics", env!("CARGO_PKG_VERSION")),
            format!("Total planes: {}", self.total_planes),
            format!(
                "Total pixels: {:.1} M, {:.2} MB RGB video RAM",
                pixels / 1_000_000.0,
                pixels * 24.0 / 8.0 / 1024.0 / 1024.0
            ),
            format!("Unchanged planes: {}", self.unchanged_planes),
            format!("Rendering skipped: {}", self.render_skip),
            format!("Blitting skipped: {}", self.blit_skip),
            format!(
                "Render time: {:.1} ms",
                self.render_time.as_secs_f64() * 1000.0
            ),
            format!(
                "Mean render time: {:.1} ms",
                self.mean_render_time().as_secs_f64() * 1000.0
            ),
            format!(
                "Mean rendering capacity: {} renderings / s",
                self.renders_per_second()
            ),
        ]
    }
}
