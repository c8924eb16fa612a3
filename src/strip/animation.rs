//! Owned animation controllers.
//!
//! The engine never reads a wall clock. Each animation is an explicit value
//! owned by its controller and advanced by the host's frame timer through
//! [`AnimationClock::advance`], so state-machine tests can step time by hand.

use std::f64::consts::PI;
use std::time::Duration;

/// Easing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing: `t`.
    #[default]
    Linear,
    /// Smooth S-curve: `(1 - cos(πt)) / 2`.
    SineInOut,
}

impl Easing {
    /// Apply the curve to progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Outcome of advancing an animation by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTick {
    /// Nothing was running.
    Idle,
    /// Still running after this frame.
    Running,
    /// Reached its target on this frame.
    Finished,
}

impl AnimationTick {
    /// Whether the frame produced a new value (running or just finished).
    pub fn ticked(self) -> bool {
        !matches!(self, AnimationTick::Idle)
    }
}

/// Value animation driven by an external timer.
pub trait AnimationClock {
    /// Start animating from `from` to `to`, replacing any running animation.
    fn start(&mut self, from: f64, to: f64, duration: Duration, easing: Easing);

    /// Current value, or `target_when_idle` when not animating.
    fn value(&self, target_when_idle: f64) -> f64;

    /// Stop immediately; `value` returns its fallback afterwards.
    fn stop(&mut self);

    /// Whether an animation is in flight.
    fn animating(&self) -> bool;

    /// Advance by `delta` of wall-clock time.
    fn advance(&mut self, delta: Duration) -> AnimationTick;
}

/// Linear-time animation with an easing curve.
#[derive(Debug, Clone, Default)]
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    running: bool,
}

impl Animation {
    /// Create an idle animation.
    pub fn new() -> Self {
        Self::default()
    }

    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

impl AnimationClock for Animation {
    fn start(&mut self, from: f64, to: f64, duration: Duration, easing: Easing) {
        self.from = from;
        self.to = to;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.easing = easing;
        self.running = true;
    }

    fn value(&self, target_when_idle: f64) -> f64 {
        if !self.running {
            return target_when_idle;
        }
        self.from + (self.to - self.from) * self.easing.apply(self.progress())
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn animating(&self) -> bool {
        self.running
    }

    fn advance(&mut self, delta: Duration) -> AnimationTick {
        if !self.running {
            return AnimationTick::Idle;
        }
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.duration {
            self.running = false;
            AnimationTick::Finished
        } else {
            AnimationTick::Running
        }
    }
}
