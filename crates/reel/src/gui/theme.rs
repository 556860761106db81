use crate::config::ThemeConfig;
use derive_more::Deref;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba};
use reel_core::motion::lerp;
use serde_with::DeserializeFromStr;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color '{0}': expected #RRGGBB")]
pub struct ColorParseError(String);

/// An opaque color written as `#RRGGBB` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Deref, DeserializeFromStr)]
pub struct HexColor(Srgb<f64>);

impl HexColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b).into_format())
    }

    pub fn with_alpha(self, alpha: f64) -> Srgba<f64> {
        Srgba::new(self.0.red, self.0.green, self.0.blue, alpha)
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Srgb<u8>>()
            .map(|c| Self(c.into_format()))
            .map_err(|_| ColorParseError(s.to_owned()))
    }
}

/// Mixes two colors channel by channel; `t = 0` is `from`.
pub fn mix(from: Srgba<f64>, to: Srgba<f64>, t: f64) -> Srgba<f64> {
    Srgba::new(
        lerp(from.red, to.red, t),
        lerp(from.green, to.green, t),
        lerp(from.blue, to.blue, t),
        lerp(from.alpha, to.alpha, t),
    )
}

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub active: Srgba<f64>,
    pub active_text: Srgba<f64>,
    pub inactive: Srgba<f64>,
    pub inactive_border: Srgba<f64>,
    pub inactive_text: Srgba<f64>,
    pub panel: Srgba<f64>,
    pub panel_text: Srgba<f64>,
    pub ticker: Srgba<f64>,
    pub bar_track: Srgba<f64>,
    pub bar_fill: Srgba<f64>,
}

impl ThemeColors {
    pub fn new(theme: &ThemeConfig, background: Srgba<f64>) -> Self {
        Self {
            background,
            active: theme.active.with_alpha(1.0),
            active_text: theme.active_text.with_alpha(1.0),
            inactive: theme.inactive.with_alpha(1.0),
            inactive_border: theme.inactive_border.with_alpha(1.0),
            inactive_text: theme.inactive_text.with_alpha(1.0),
            panel: theme.panel.with_alpha(1.0),
            panel_text: theme.panel_text.with_alpha(1.0),
            ticker: theme.ticker.with_alpha(1.0),
            bar_track: theme.bar_track.with_alpha(1.0),
            bar_fill: theme.bar_fill.with_alpha(1.0),
        }
    }

    /// Card colors come from the config; only the backdrop follows the GTK theme.
    pub fn from_context(context: &gtk::StyleContext, theme: &ThemeConfig) -> Self {
        let background =
            Self::lookup_color(context, "theme_bg_color", Srgba::new(0.96, 0.96, 0.96, 1.0));
        Self::new(theme, background)
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.reel-carousel, .reel-panel {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_deserialization() {
        let cases = vec![
            ("\"#5C898E\"", HexColor::rgb(0x5C, 0x89, 0x8E)),
            ("\"#ffffff\"", HexColor::rgb(0xFF, 0xFF, 0xFF)),
            ("\" #1E2A31 \"", HexColor::rgb(0x1E, 0x2A, 0x31)),
        ];

        for (json, expected) in cases {
            let deserialized: HexColor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<HexColor>("\"teal\"").is_err());
    }

    #[test]
    fn test_mix() {
        let white = Srgba::new(1.0, 1.0, 1.0, 1.0);
        let black = Srgba::new(0.0, 0.0, 0.0, 0.0);
        let mid = mix(white, black, 0.5);
        assert!((mid.red - 0.5).abs() < 1e-9);
        assert!((mid.alpha - 0.5).abs() < 1e-9);
        assert_eq!(mix(white, black, 0.0), white);
    }
}
