//! Horizontal scroll offset of the full presentation.
//!
//! # Clamping Behavior
//! The offset always lies in `[0, max]` where
//! `max = max(0, content_width - viewport_width)`. Every mutation clamps,
//! and mutations that would not move the offset report `false` so callers
//! can skip repaint and load-more checks.

/// Scroll offset plus its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollController {
    left: i32,
    max: i32,
}

impl ScrollController {
    /// Create a controller scrolled to the start with no scrollable range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset.
    pub fn left(&self) -> i32 {
        self.left
    }

    /// Upper bound of the offset.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Recompute the bound after an item-count or viewport change.
    ///
    /// Returns whether the offset had to be clamped.
    pub fn clamp_and_update_max(&mut self, content_width: i32, viewport_width: i32) -> bool {
        self.max = content_width.saturating_sub(viewport_width).max(0);
        let clamped = self.left.clamp(0, self.max);
        let changed = clamped != self.left;
        self.left = clamped;
        changed
    }

    /// Scroll by a pointer delta; positive deltas move content right.
    ///
    /// Returns whether the offset changed.
    pub fn apply_delta(&mut self, delta: i32) -> bool {
        self.set_left(self.left.saturating_sub(delta))
    }

    /// Set the offset, clamped into range. Returns whether it changed.
    pub fn set_left(&mut self, left: i32) -> bool {
        let next = left.clamp(0, self.max);
        if next == self.left {
            return false;
        }
        self.left = next;
        true
    }

    /// Whether less than `preload_pages` viewports remain to the end.
    ///
    /// Level-triggered: stays true on every check while within range.
    pub fn should_load_more(&self, viewport_width: i32, preload_pages: i32) -> bool {
        self.max - self.left < viewport_width.saturating_mul(preload_pages)
    }
}
