//! Behavioural tunables of the strip engine.

use std::time::Duration;

/// Tunables that shape thresholds, pacing and interaction.
///
/// # Invariants
/// Enforced by [`crate::config`] when loading from a file:
/// - `0 <= collapse_after_ratio <= expand_after_ratio <= 1`
/// - `0 <= friction_ratio <= 1`
/// - `small_thumbs_shown >= 1`, `preload_pages >= 0`, `drag_distance >= 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripConfig {
    /// Maximum number of circles in the compact row.
    pub small_thumbs_shown: i32,
    /// Load more when fewer than this many viewport widths remain to scroll.
    pub preload_pages: i32,
    /// Growing ratio above which expanded mode is requested.
    pub expand_after_ratio: f64,
    /// Shrinking ratio below which compact mode is requested.
    pub collapse_after_ratio: f64,
    /// Damping of the compact contribution to the blended ratio.
    pub friction_ratio: f64,
    /// Duration of the momentum catch-up ramp.
    pub expand_catch_up_duration: Duration,
    /// Duration of the expand/collapse visual animation.
    pub expand_duration: Duration,
    /// Whether the trailing region past the last visible slot selects that slot.
    pub full_clickable: bool,
    /// Manhattan distance the pointer must travel before a press becomes a drag.
    pub drag_distance: i32,
    /// Mirror horizontal scroll directions.
    pub right_to_left: bool,
}

/// Default compact-row capacity.
pub const SMALL_THUMBS_SHOWN: i32 = 3;
/// Default preload page multiplier.
pub const PRELOAD_PAGES: i32 = 2;
/// Default expand threshold.
pub const EXPAND_AFTER_RATIO: f64 = 0.72;
/// Default collapse threshold.
pub const COLLAPSE_AFTER_RATIO: f64 = 0.68;
/// Default friction factor.
pub const FRICTION_RATIO: f64 = 0.15;
/// Default catch-up duration.
pub const EXPAND_CATCH_UP_DURATION: Duration = Duration::from_millis(200);
/// Default expand/collapse duration.
pub const EXPAND_DURATION: Duration = Duration::from_millis(200);

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            small_thumbs_shown: SMALL_THUMBS_SHOWN,
            preload_pages: PRELOAD_PAGES,
            expand_after_ratio: EXPAND_AFTER_RATIO,
            collapse_after_ratio: COLLAPSE_AFTER_RATIO,
            friction_ratio: FRICTION_RATIO,
            expand_catch_up_duration: EXPAND_CATCH_UP_DURATION,
            expand_duration: EXPAND_DURATION,
            full_clickable: false,
            drag_distance: 2,
            right_to_left: false,
        }
    }
}

impl StripConfig {
    /// Scroll direction multiplier for horizontal deltas.
    pub fn direction_sign(&self) -> i32 {
        if self.right_to_left {
            -1
        } else {
            1
        }
    }
}
