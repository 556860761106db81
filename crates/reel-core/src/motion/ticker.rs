use super::easing::Easing;
use super::tween::{Timing, Tween};

pub const TICKER_DURATION_MS: u64 = 600;
const MIN_DURATION_MS: u64 = 100;
const DEFAULT_DIGITS: usize = 2;

/// Reads the number out of ids such as `"01"` or `"#12"`. Dots and minus
/// signs are kept, so `"No. 12"` reads as `.12`. Anything that does not form
/// a finite number counts as zero.
pub fn parse_numeric(id: &str) -> f64 {
    let cleaned: String = id
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn digit_count(id: &str) -> usize {
    match id.chars().filter(char::is_ascii_digit).count() {
        0 => DEFAULT_DIGITS,
        n => n,
    }
}

/// Counts from the previous id to the next one, keeping the zero padding of
/// the target.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberTicker {
    tween: Tween,
    digits: usize,
    duration_ms: u64,
}

impl NumberTicker {
    pub fn new(id: &str, duration_ms: u64) -> Self {
        Self {
            tween: Tween::settled(parse_numeric(id)),
            digits: digit_count(id),
            duration_ms: duration_ms.max(MIN_DURATION_MS),
        }
    }

    pub fn retarget(&mut self, id: &str, now_ms: u64) {
        let target = parse_numeric(id);
        self.digits = digit_count(id);
        self.tween = Tween::new(
            self.tween.to,
            target,
            Timing::new(now_ms, self.duration_ms, Easing::EaseOut),
        );
    }

    pub fn value(&self, now_ms: u64) -> f64 {
        self.tween.value(now_ms)
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.tween.is_finished(now_ms)
    }

    pub fn display(&self, now_ms: u64) -> String {
        let rounded = (self.value(now_ms) + 0.0001).floor() as i64;
        format!("{:0width$}", rounded, width = self.digits)
    }
}
