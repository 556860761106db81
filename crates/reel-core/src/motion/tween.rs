use super::easing::{Easing, lerp};

/// Start time, length and curve of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Timing {
    pub fn new(start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            start_ms,
            duration_ms,
            easing,
        }
    }

    pub fn instant(now_ms: u64) -> Self {
        Self::new(now_ms, 0, Easing::Linear)
    }

    /// Linear progress in `[0, 1]`. Zero-length transitions are always complete.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
        (elapsed / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn eased(&self, now_ms: u64) -> f64 {
        self.easing.apply(self.progress(now_ms))
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub timing: Timing,
}

impl Tween {
    pub fn new(from: f64, to: f64, timing: Timing) -> Self {
        Self { from, to, timing }
    }

    pub fn settled(value: f64) -> Self {
        Self::new(value, value, Timing::instant(0))
    }

    pub fn value(&self, now_ms: u64) -> f64 {
        lerp(self.from, self.to, self.timing.eased(now_ms))
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.timing.is_finished(now_ms)
    }

    /// Starts a new transition from wherever this one currently is.
    pub fn retarget(&mut self, to: f64, timing: Timing) {
        let from = self.value(timing.start_ms);
        *self = Self::new(from, to, timing);
    }

    /// Stops at the current value.
    pub fn freeze(&mut self, now_ms: u64) {
        *self = Self::settled(self.value(now_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_is_complete() {
        let tween = Tween::new(0.0, 10.0, Timing::instant(100));
        assert!(tween.is_finished(0));
        assert!((tween.value(0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_linear_progress() {
        let tween = Tween::new(0.0, 100.0, Timing::new(1000, 200, Easing::Linear));
        assert!((tween.value(999) - 0.0).abs() < f64::EPSILON);
        assert!((tween.value(1100) - 50.0).abs() < 1e-9);
        assert!((tween.value(1200) - 100.0).abs() < 1e-9);
        assert!((tween.value(5000) - 100.0).abs() < 1e-9);
        assert!(!tween.is_finished(1199));
        assert!(tween.is_finished(1200));
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut tween = Tween::new(0.0, 100.0, Timing::new(0, 100, Easing::Linear));
        tween.retarget(0.0, Timing::new(50, 100, Easing::Linear));
        assert!((tween.from - 50.0).abs() < 1e-9);
        assert!((tween.value(100) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_freeze_holds_value() {
        let mut tween = Tween::new(0.0, 100.0, Timing::new(0, 100, Easing::Linear));
        tween.freeze(25);
        assert!((tween.value(10_000) - 25.0).abs() < 1e-9);
        assert!(tween.is_finished(0));
    }
}
