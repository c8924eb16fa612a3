//! Host-side driver of the expanding height.
//!
//! In a real client the strip sits above a vertically scrolling list, and
//! that list decides how much of the expanded strip is uncovered. The
//! preview has no such list, so [`HeightDriver`] plays its part: it turns
//! key presses into heights, follows expand/collapse requests from the
//! strip by easing the height one line per frame, and reproduces the
//! momentum-then-settle sequence that starts a catch-up ramp.

use crate::strip::StoriesList;
use tracing::debug;

/// Expanding height owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightDriver {
    height: i32,
    capacity: i32,
    target: Option<i32>,
    settle: bool,
}

impl HeightDriver {
    /// Fully covered strip with the given capacity.
    pub fn new(capacity: i32) -> Self {
        Self {
            height: 0,
            capacity: capacity.max(0),
            target: None,
            settle: false,
        }
    }

    /// Current height.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Full height.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Whether frames are needed to reach a target or settle a momentum jump.
    pub fn is_moving(&self) -> bool {
        self.target.is_some() || self.settle
    }

    /// Uncover (`delta > 0`) or cover the strip by `delta` lines.
    ///
    /// Manual input cancels any eased target.
    pub fn nudge(&mut self, delta: i32, list: &mut StoriesList) {
        self.target = None;
        self.settle = false;
        self.set(self.height + delta, false, list);
    }

    /// Jump straight to full height as momentum scrolling would, or back to
    /// zero when already there.
    ///
    /// The engine ignores a momentum jump from zero, so the next frame
    /// repeats the height without momentum.
    pub fn momentum_snap(&mut self, list: &mut StoriesList) {
        self.target = None;
        let height = if self.height >= self.capacity {
            0
        } else {
            self.capacity
        };
        self.settle = height > 0;
        self.set(height, true, list);
    }

    /// Follow an expand/collapse request from the strip.
    pub fn follow(&mut self, expanded: bool) {
        let target = if expanded { self.capacity } else { 0 };
        if target != self.height {
            debug!(target, "Easing expanding height");
            self.target = Some(target);
        }
    }

    /// Advance one frame. Returns whether the height moved.
    pub fn step(&mut self, list: &mut StoriesList) -> bool {
        if self.settle {
            self.settle = false;
            list.set_expanded_height(self.height, false);
            return true;
        }
        let Some(target) = self.target else {
            return false;
        };
        let next = self.height + (target - self.height).signum();
        if next == target {
            self.target = None;
        }
        self.set(next, false, list);
        true
    }

    fn set(&mut self, height: i32, momentum: bool, list: &mut StoriesList) {
        self.height = height.clamp(0, self.capacity);
        list.set_expanded_height(self.height, momentum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::{StripConfig, StripState, StripStyle};

    fn list() -> StoriesList {
        StoriesList::new(StripStyle::default(), StripConfig::default()).expect("valid style")
    }

    #[test]
    fn nudge_clamps_to_capacity() {
        let mut list = list();
        let mut driver = HeightDriver::new(6);

        driver.nudge(10, &mut list);
        assert_eq!(driver.height(), 6);

        driver.nudge(-10, &mut list);
        assert_eq!(driver.height(), 0);
        assert_eq!(list.state(), StripState::Compact);
    }

    #[test]
    fn follow_eases_one_line_per_step() {
        let mut list = list();
        let mut driver = HeightDriver::new(3);

        driver.follow(true);
        let mut heights = Vec::new();
        while driver.step(&mut list) {
            heights.push(driver.height());
        }

        assert_eq!(heights, vec![1, 2, 3]);
        assert!(!driver.is_moving());
    }

    #[test]
    fn follow_to_current_height_is_a_no_op() {
        let mut driver = HeightDriver::new(6);
        driver.follow(false);
        assert!(!driver.is_moving());
    }

    #[test]
    fn manual_nudge_cancels_target() {
        let mut list = list();
        let mut driver = HeightDriver::new(6);

        driver.follow(true);
        driver.nudge(1, &mut list);

        assert!(!driver.is_moving());
        assert_eq!(driver.height(), 1);
    }

    #[test]
    fn momentum_snap_settles_on_next_step() {
        let mut list = list();
        let mut driver = HeightDriver::new(6);

        driver.momentum_snap(&mut list);
        assert_eq!(driver.height(), 6);
        // Momentum from zero is ignored by the engine.
        assert_eq!(list.state(), StripState::Compact);

        assert!(driver.step(&mut list));
        assert_eq!(list.state(), StripState::Transitioning);
        assert!(list.is_animating(), "catch-up ramp should run");
    }

    #[test]
    fn momentum_snap_at_full_height_collapses() {
        let mut list = list();
        let mut driver = HeightDriver::new(6);
        driver.nudge(6, &mut list);

        driver.momentum_snap(&mut list);

        assert_eq!(driver.height(), 0);
        assert!(!driver.is_moving());
    }
}
