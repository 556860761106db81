//! Time-driven value animation. Everything here takes explicit millisecond
//! timestamps so callers decide where the clock comes from.

pub mod easing;
pub mod ticker;
pub mod tween;
pub mod typing;

pub use easing::{CubicBezier, Easing, lerp};
pub use ticker::NumberTicker;
pub use tween::{Timing, Tween};
pub use typing::TypingAnimation;
