//! Turns raw wheel and swipe input into rotation commands.
//!
//! Adapters never touch the rotation engine. They emit [`RotationCommand`]s and
//! whoever owns the carousel decides what to do with them.

use super::rotation::Direction;
use serde::Deserialize;

pub const WHEEL_THRESHOLD: f64 = 80.0;
pub const SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationCommand {
    Step(Direction),
    JumpTo(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub wheel_threshold: f64,
    pub swipe_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            wheel_threshold: WHEEL_THRESHOLD,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

fn sane_threshold(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cooldown {
    until_ms: Option<u64>,
}

impl Cooldown {
    pub fn is_active(&self, now_ms: u64) -> bool {
        self.until_ms.is_some_and(|until| now_ms < until)
    }

    pub fn engage(&mut self, now_ms: u64, duration_ms: u64) {
        self.until_ms = Some(now_ms.saturating_add(duration_ms));
    }

    pub fn clear(&mut self) {
        self.until_ms = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelAdapter {
    threshold: f64,
    cooldown_ms: u64,
    accumulated: f64,
    cooldown: Cooldown,
}

impl WheelAdapter {
    pub fn new(threshold: f64, cooldown_ms: u64) -> Self {
        Self {
            threshold: sane_threshold(threshold, WHEEL_THRESHOLD),
            cooldown_ms,
            accumulated: 0.0,
            cooldown: Cooldown::default(),
        }
    }

    /// Scrolling down (positive delta) moves forward. At most one step per
    /// cooldown window; input arriving during the cooldown is dropped. Only the
    /// part of the accumulated distance below one threshold carries over.
    pub fn on_wheel(&mut self, delta_y: f64, now_ms: u64) -> Option<RotationCommand> {
        if self.cooldown.is_active(now_ms) || !delta_y.is_finite() {
            return None;
        }

        self.accumulated += delta_y;
        if self.accumulated.abs() < self.threshold {
            return None;
        }

        let direction = Direction::from_sign(self.accumulated);
        self.accumulated %= self.threshold;
        self.cooldown.engage(now_ms, self.cooldown_ms);
        Some(RotationCommand::Step(direction))
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
        self.cooldown.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeAdapter {
    threshold: f64,
    cooldown_ms: u64,
    start_x: Option<f64>,
    cooldown: Cooldown,
}

impl SwipeAdapter {
    pub fn new(threshold: f64, cooldown_ms: u64) -> Self {
        Self {
            threshold: sane_threshold(threshold, SWIPE_THRESHOLD),
            cooldown_ms,
            start_x: None,
            cooldown: Cooldown::default(),
        }
    }

    pub fn begin(&mut self, x: f64, now_ms: u64) {
        if self.cooldown.is_active(now_ms) {
            return;
        }
        self.start_x = Some(x);
    }

    /// Swiping right goes back, swiping left goes forward. A single continuous
    /// swipe resolves at most one step.
    pub fn moved(&mut self, x: f64, now_ms: u64) -> Option<RotationCommand> {
        let start = self.start_x?;
        if self.cooldown.is_active(now_ms) {
            return None;
        }

        let delta = x - start;
        if delta.abs() <= self.threshold {
            return None;
        }

        self.start_x = None;
        self.cooldown.engage(now_ms, self.cooldown_ms);
        let direction = if delta > 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        };
        Some(RotationCommand::Step(direction))
    }

    pub fn end(&mut self) {
        self.start_x = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn reset(&mut self) {
        self.start_x = None;
        self.cooldown.clear();
    }
}
