// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: compute enter/leave transitions from target changes.
//!
//! ## Minimal example
//!
//! ```
//! use planes_display::hover::{HoverEvent, HoverState};
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update(Some(1)), vec![HoverEvent::Enter(1)]);
//! assert_eq!(h.update(Some(1)), vec![]);
//! assert_eq!(h.update(Some(2)), vec![HoverEvent::Leave(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update(None), vec![HoverEvent::Leave(2)]);
//! ```

/// A single-target hover state machine.
///
/// Tracks the currently hovered key. `None` means nothing is hovered, which is also what the
/// display reports while the pointer is over its own background.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Option<K>,
}

/// A hover transition event.
///
/// Returned by [`HoverState::update`]; a leave always comes before the matching enter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer enters the given target.
    Enter(K),
    /// Pointer leaves the given target.
    Leave(K),
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The currently hovered target.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Forget the current target, returning the matching leave event.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.current.take().map(HoverEvent::Leave).into_iter().collect()
    }

    /// Move the hover to `target` and return the transitions needed to get there.
    ///
    /// Nothing is emitted while the target stays the same.
    pub fn update(&mut self, target: Option<K>) -> Vec<HoverEvent<K>> {
        if target == self.current {
            return Vec::new();
        }
        let mut out = self.clear();
        if let Some(k) = target {
            out.push(HoverEvent::Enter(k));
        }
        self.current = target;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_between_targets() {
        let mut h = HoverState::new();
        assert_eq!(h.update(Some('a')), vec![HoverEvent::Enter('a')]);
        assert_eq!(
            h.update(Some('b')),
            vec![HoverEvent::Leave('a'), HoverEvent::Enter('b')]
        );
        assert_eq!(h.current(), Some('b'));
    }

    #[test]
    fn staying_is_silent() {
        let mut h = HoverState::new();
        h.update(Some(3));
        assert!(h.update(Some(3)).is_empty());
        assert!(HoverState::<u8>::new().update(None).is_empty());
    }

    #[test]
    fn clear_leaves_once() {
        let mut h = HoverState::new();
        h.update(Some(9));
        assert_eq!(h.clear(), vec![HoverEvent::Leave(9)]);
        assert!(h.clear().is_empty());
        assert_eq!(h.current(), None);
    }
}
