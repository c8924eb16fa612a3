//! Compact/expanded state machine.
//!
//! Two independent inputs drive the strip:
//! - the host's continuous expanding height (how much vertical room the
//!   strip currently has), converted to a ratio with hysteresis thresholds;
//! - explicit expand/collapse requests from clicks, wheel or drag.
//!
//! Mode changes start the expand/collapse animation. The discrete
//! [`StripState`] follows the expanding height and is only allowed to reach
//! `Expanded` once every animation has settled.

use super::animation::{Animation, AnimationClock, AnimationTick, Easing};
use super::params::StripConfig;
use crate::model::StripError;
use std::time::Duration;
use tracing::{debug, error};

/// Discrete presentation state, which decides the widget's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripState {
    /// Only the compact row is shown.
    #[default]
    Compact,
    /// Animating between presentations; geometry spans both.
    Transitioning,
    /// Full row shown at full height.
    Expanded,
}

/// Per-frame result of advancing both animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionTick {
    /// Expand/collapse visual animation.
    pub expanded: AnimationTick,
    /// Momentum catch-up ramp.
    pub catch_up: AnimationTick,
}

/// Hysteresis state machine with owned animations.
#[derive(Debug, Clone)]
pub struct ExpansionController<A = Animation> {
    expanded: bool,
    last_ratio: f64,
    state: StripState,
    last_expanded_height: i32,
    expand_ignored: bool,
    capacity: i32,
    expand_after_ratio: f64,
    collapse_after_ratio: f64,
    expand_duration: Duration,
    catch_up_duration: Duration,
    expanded_animation: A,
    catch_up_animation: A,
}

impl<A: AnimationClock + Default> ExpansionController<A> {
    /// Create a compact controller for a strip whose full height is `capacity`.
    pub fn new(config: &StripConfig, capacity: i32) -> Self {
        Self::with_clocks(config, capacity, A::default(), A::default())
    }
}

impl<A: AnimationClock> ExpansionController<A> {
    /// Create a controller with explicit animation clocks.
    pub fn with_clocks(config: &StripConfig, capacity: i32, expanded: A, catch_up: A) -> Self {
        Self {
            expanded: false,
            last_ratio: 0.0,
            state: StripState::Compact,
            last_expanded_height: 0,
            expand_ignored: false,
            capacity,
            expand_after_ratio: config.expand_after_ratio,
            collapse_after_ratio: config.collapse_after_ratio,
            expand_duration: config.expand_duration,
            catch_up_duration: config.expand_catch_up_duration,
            expanded_animation: expanded,
            catch_up_animation: catch_up,
        }
    }

    /// Whether expanded mode is the current target.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Discrete state.
    pub fn state(&self) -> StripState {
        self.state
    }

    /// Last observed expansion ratio in `[0, 1]`.
    pub fn last_ratio(&self) -> f64 {
        self.last_ratio
    }

    /// Last accepted expanding height.
    pub fn last_expanded_height(&self) -> i32 {
        self.last_expanded_height
    }

    /// Height at which the strip counts as fully expanded.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Current value of the expand/collapse animation (0 compact, 1 expanded).
    pub fn expanded_value(&self) -> f64 {
        self.expanded_animation
            .value(if self.expanded { 1.0 } else { 0.0 })
    }

    /// Whether either animation is in flight.
    pub fn animating(&self) -> bool {
        self.expanded_animation.animating() || self.catch_up_animation.animating()
    }

    /// Feed a new expanding height; returns the mode requested by hysteresis.
    ///
    /// Expanded mode is requested when a growing ratio passes the expand
    /// threshold, compact mode when a shrinking ratio drops below the
    /// collapse threshold. Between the two thresholds nothing changes.
    ///
    /// # Errors
    /// [`StripError::ZeroCapacity`] when a nonzero height arrives with zero
    /// capacity. State is left untouched.
    pub fn update_expanding(
        &mut self,
        expanding_height: i32,
        expanded_height: i32,
    ) -> Result<Option<bool>, StripError> {
        if expanding_height != 0 && expanded_height <= 0 {
            error!(
                expanding_height,
                expanded_height, "Rejected expanding height without capacity"
            );
            return Err(StripError::ZeroCapacity { expanding_height });
        }
        let ratio = if expanding_height == 0 {
            0.0
        } else {
            f64::from(expanding_height) / f64::from(expanded_height)
        };
        if ratio == self.last_ratio {
            return Ok(None);
        }
        let expanding = ratio > self.last_ratio;
        self.last_ratio = ratio;
        let change = if self.expanded {
            !expanding && ratio < self.collapse_after_ratio
        } else {
            expanding && ratio > self.expand_after_ratio
        };
        if !change {
            return Ok(None);
        }
        let target = !self.expanded;
        self.request_expanded(target);
        Ok(Some(target))
    }

    /// Re-evaluate the ratio from the last height, scaled by the catch-up ramp.
    ///
    /// Called before every layout so the ratio tracks the ramp frame by frame.
    pub fn sync(&mut self) -> Option<bool> {
        let scaled = f64::from(self.last_expanded_height) * self.catch_up_animation.value(1.0);
        // Truncation matches integer pixel heights.
        self.update_expanding(scaled as i32, self.capacity)
            .unwrap_or(None)
    }

    /// Switch the target mode, animating from the current visual value.
    ///
    /// Returns whether the target changed.
    pub fn request_expanded(&mut self, expanded: bool) -> bool {
        if self.expanded == expanded {
            return false;
        }
        let from = self.expanded_value();
        self.expanded = expanded;
        let till = if expanded { 1.0 } else { 0.0 };
        self.expanded_animation
            .start(from, till, self.expand_duration, Easing::SineInOut);
        debug!(expanded, from, "Expand/collapse requested");
        true
    }

    /// Feed the host's current expanding height.
    ///
    /// A momentum-driven jump from zero straight to a positive height is
    /// ignored; the next non-momentum height starts a catch-up ramp instead
    /// of snapping.
    pub fn set_expanded_height(&mut self, height: i32, momentum: bool) {
        let height = height.clamp(0, self.capacity.max(0));
        if self.last_expanded_height == height {
            return;
        } else if momentum && self.expand_ignored {
            return;
        } else if momentum && height > 0 && self.last_expanded_height == 0 {
            self.expand_ignored = true;
            return;
        } else if !momentum && self.expand_ignored && height > 0 {
            self.expand_ignored = false;
            self.catch_up_animation
                .start(0.0, 1.0, self.catch_up_duration, Easing::Linear);
        } else if height == 0 && self.catch_up_animation.animating() {
            self.catch_up_animation.stop();
        }
        self.last_expanded_height = height;
        if !self.check_for_full_state() {
            self.set_state(if height == 0 {
                StripState::Compact
            } else {
                StripState::Transitioning
            });
        }
    }

    /// Enter `Expanded` when at full height and nothing is animating.
    pub fn check_for_full_state(&mut self) -> bool {
        if self.animating() || self.last_expanded_height < self.capacity {
            return false;
        }
        self.set_state(StripState::Expanded);
        true
    }

    /// Advance both animations by one frame.
    pub fn advance(&mut self, delta: Duration) -> ExpansionTick {
        ExpansionTick {
            expanded: self.expanded_animation.advance(delta),
            catch_up: self.catch_up_animation.advance(delta),
        }
    }

    fn set_state(&mut self, state: StripState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "Strip state changed");
            self.state = state;
        }
    }
}

#[cfg(test)]
#[path = "expansion_tests.rs"]
mod tests;
