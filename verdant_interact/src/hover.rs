// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exclusive hover tracking.

/// The hovered index of one chart, if any.
///
/// At most one index is hovered at a time: entering a new index replaces the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker {
    hovered: Option<usize>,
}

impl HoverTracker {
    /// Creates an idle tracker.
    pub const fn new() -> Self {
        Self { hovered: None }
    }

    /// The pointer entered `index`. Returns `true` if the hovered index changed.
    pub fn enter(&mut self, index: usize) -> bool {
        let changed = self.hovered != Some(index);
        if changed {
            log::trace!("hover {:?} -> {index}", self.hovered);
            self.hovered = Some(index);
        }
        changed
    }

    /// The pointer left `index`. Stale leaves (for an index that is no longer hovered) are
    /// ignored. Returns `true` if the tracker became idle.
    pub fn leave(&mut self, index: usize) -> bool {
        if self.hovered != Some(index) {
            return false;
        }
        log::trace!("hover {index} -> idle");
        self.hovered = None;
        true
    }

    /// Forces the idle state. Returns `true` if something was hovered.
    pub fn clear(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    /// Currently hovered index.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Whether `index` is hovered.
    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered == Some(index)
    }
}
