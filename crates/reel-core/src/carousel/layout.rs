use crate::motion::Easing;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Smallest cooldown applied after a gesture resolves a step.
pub const MIN_COOLDOWN_MS: u64 = 150;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("visible window must hold at least one card")]
    NoVisibleSlots,
    #[error("repeat factor must be at least one")]
    NoRepeats,
    #[error("layout constant `{0}` must be a finite number")]
    NotFinite(&'static str),
    #[error("card size must be positive (got {width}x{height})")]
    EmptyCard { width: f64, height: f64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid anchor '{0}': expected \"centered\" or a pixel offset")]
pub struct AnchorParseError(String);

/// Where the parabola's zero line sits horizontally.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub enum Anchor {
    Fixed(f64),
    Centered,
}

impl FromStr for Anchor {
    type Err = AnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("centered") || trimmed.eq_ignore_ascii_case("center") {
            return Ok(Self::Centered);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Self::Fixed)
            .ok_or_else(|| AnchorParseError(s.to_owned()))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(px) => write!(f, "{px}"),
            Self::Centered => f.write_str("centered"),
        }
    }
}

/// Visual constants of one carousel. Sizes are pixels, paddings are percent of
/// the container height, tilt is degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub visible: usize,
    pub repeats: usize,
    pub amplitude: f64,
    pub card_width: f64,
    pub card_height: f64,
    pub container_height: f64,
    pub tilt_max: f64,
    pub top_pad: f64,
    pub bottom_pad: f64,
    pub anim_ms: u64,
    pub highlight_ms: u64,
    pub anchor: Anchor,
    pub easing: Easing,
}

impl Default for Layout {
    fn default() -> Self {
        Self::vertical()
    }
}

impl Layout {
    /// Tall stack with five cards in view.
    pub fn vertical() -> Self {
        Self {
            visible: 5,
            repeats: 5,
            amplitude: 50.0,
            card_width: 295.0,
            card_height: 120.0,
            container_height: 700.0,
            tilt_max: 10.0,
            top_pad: 8.0,
            bottom_pad: 8.0,
            anim_ms: 500,
            highlight_ms: 150,
            anchor: Anchor::Centered,
            easing: Easing::Snap,
        }
    }

    /// Compact strip with three cards in view, drawn turned on its side.
    pub fn horizontal() -> Self {
        Self {
            visible: 3,
            amplitude: 30.0,
            card_width: 255.0,
            card_height: 100.0,
            container_height: 350.0,
            ..Self::vertical()
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.visible == 0 {
            return Err(LayoutError::NoVisibleSlots);
        }
        if self.repeats == 0 {
            return Err(LayoutError::NoRepeats);
        }
        let constants = [
            ("amplitude", self.amplitude),
            ("card_width", self.card_width),
            ("card_height", self.card_height),
            ("container_height", self.container_height),
            ("tilt_max", self.tilt_max),
            ("top_pad", self.top_pad),
            ("bottom_pad", self.bottom_pad),
        ];
        if let Some((name, _)) = constants.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(LayoutError::NotFinite(name));
        }
        if self.card_width <= 0.0 || self.card_height <= 0.0 {
            return Err(LayoutError::EmptyCard {
                width: self.card_width,
                height: self.card_height,
            });
        }
        Ok(())
    }

    pub fn total_slots(&self) -> usize {
        self.visible * self.repeats
    }

    /// Off-screen slots above (and below) the visible band.
    pub fn buffer(&self) -> usize {
        (self.total_slots() - self.visible) / 2
    }

    pub fn center(&self) -> usize {
        self.buffer() + self.visible / 2
    }

    pub fn cooldown_ms(&self) -> u64 {
        MIN_COOLDOWN_MS.max(self.anim_ms.saturating_mul(3) / 10)
    }

    pub fn base_left(&self, container_width: f64) -> f64 {
        match self.anchor {
            Anchor::Fixed(px) => px,
            Anchor::Centered => {
                (container_width / 2.0 - self.card_width / 2.0 - self.amplitude).round()
            }
        }
    }
}
