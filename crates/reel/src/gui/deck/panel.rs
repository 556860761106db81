use crate::config::PanelConfig;
use reel_core::motion::{Easing, NumberTicker, Timing, Tween, TypingAnimation};
use reel_core::types::ContentItem;

const PULSE_SCALE: f64 = 0.95;
const BAR_FILL_MS: u64 = 500;

/// The detail card next to the carousels: a counting id, the typed title and
/// description, and one progress bar per item.
#[derive(Debug, Clone)]
pub struct DetailPanel {
    settings: PanelConfig,
    ticker: NumberTicker,
    title: TypingAnimation,
    description: TypingAnimation,
    scale: Tween,
    release_ms: Option<u64>,
    bars: Vec<Tween>,
    active: Option<usize>,
}

impl DetailPanel {
    pub fn new(items: &[ContentItem], settings: PanelConfig, now_ms: u64) -> Self {
        let first_id = items.first().map(|item| item.id.as_str()).unwrap_or("");
        let mut panel = Self {
            settings,
            ticker: NumberTicker::new(first_id, settings.ticker_ms),
            title: TypingAnimation::single("", settings.title_speed_ms, settings.pause_ms),
            description: TypingAnimation::single(
                "",
                settings.description_speed_ms,
                settings.pause_ms,
            ),
            scale: Tween::settled(1.0),
            release_ms: None,
            bars: vec![Tween::settled(0.0); items.len()],
            active: None,
        };
        if !items.is_empty() {
            panel.show(items, 0, now_ms);
        }
        panel
    }

    /// Switches to `items[index]`: the id counts over from the previous one and
    /// both texts start typing from scratch.
    pub fn show(&mut self, items: &[ContentItem], index: usize, now_ms: u64) {
        let Some(item) = items.get(index) else {
            return;
        };
        if self.bars.len() != items.len() {
            self.bars = vec![Tween::settled(0.0); items.len()];
        }

        if self.active.is_some() {
            self.ticker.retarget(&item.id, now_ms);
        }
        self.title.restart_with(vec![item.title.to_string()], now_ms);
        self.description.restart_with(vec![item.description.clone()], now_ms);

        if let Some(bar) = self.active.and_then(|i| self.bars.get_mut(i)) {
            *bar = Tween::settled(0.0);
        }
        if let Some(bar) = self.bars.get_mut(index) {
            *bar = Tween::new(0.0, 1.0, Timing::new(now_ms, BAR_FILL_MS, Easing::EaseInOut));
        }
        self.active = Some(index);
        self.pulse(now_ms);
    }

    /// Shrinks the panel briefly; it springs back on a later tick.
    pub fn pulse(&mut self, now_ms: u64) {
        self.scale.retarget(
            PULSE_SCALE,
            Timing::new(now_ms, self.settings.pulse_ms, Easing::EaseInOut),
        );
        self.release_ms = Some(now_ms.saturating_add(self.settings.pulse_ms));
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        if let Some(release) = self.release_ms
            && release <= now_ms
        {
            self.release_ms = None;
            self.scale.retarget(
                1.0,
                Timing::new(release, self.settings.pulse_ms, Easing::EaseInOut),
            );
        }

        let typed = self.title.tick(now_ms) | self.description.tick(now_ms);
        typed || !self.is_settled(now_ms)
    }

    pub fn is_settled(&self, now_ms: u64) -> bool {
        self.release_ms.is_none()
            && self.scale.is_finished(now_ms)
            && self.ticker.is_finished(now_ms)
            && self.bars.iter().all(|bar| bar.is_finished(now_ms))
    }

    pub fn stop(&mut self) {
        self.title.stop();
        self.description.stop();
        self.release_ms = None;
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn ticker_text(&self, now_ms: u64) -> String {
        self.ticker.display(now_ms)
    }

    pub fn title_text(&self) -> String {
        self.title.displayed()
    }

    pub fn description_text(&self) -> String {
        self.description.displayed()
    }

    pub fn scale(&self, now_ms: u64) -> f64 {
        self.scale.value(now_ms)
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn bar_fill(&self, index: usize, now_ms: u64) -> f64 {
        self.bars.get(index).map_or(0.0, |bar| bar.value(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::types::default_items;

    fn settings() -> PanelConfig {
        PanelConfig::default()
    }

    #[test]
    fn test_first_item_types_in() {
        let items = default_items();
        let mut panel = DetailPanel::new(&items, settings(), 0);
        assert_eq!(panel.ticker_text(0), "01");
        assert_eq!(panel.title_text(), "");

        assert!(panel.tick(80));
        assert_eq!(panel.title_text(), "D");
        panel.tick(80 * 6);
        assert_eq!(panel.title_text(), "Design");

        panel.tick(60_000);
        assert_eq!(panel.title_text(), items[0].title.as_str());
        assert_eq!(panel.description_text(), items[0].description);
        assert!(!panel.tick(60_001));
    }

    #[test]
    fn test_show_counts_from_previous_id() {
        let items = default_items();
        let mut panel = DetailPanel::new(&items, settings(), 0);
        panel.tick(10_000);

        panel.show(&items, 4, 10_000);
        assert_eq!(panel.ticker_text(10_000), "01");
        assert_eq!(panel.ticker_text(10_600), "05");
        assert_eq!(panel.title_text(), "");
        assert_eq!(panel.active(), Some(4));
    }

    #[test]
    fn test_only_active_bar_fills() {
        let items = default_items();
        let mut panel = DetailPanel::new(&items, settings(), 0);
        assert_eq!(panel.bar_count(), 6);
        assert!((panel.bar_fill(0, 500) - 1.0).abs() < 1e-9);

        panel.show(&items, 2, 1000);
        assert!(panel.bar_fill(0, 1000).abs() < 1e-9);
        assert!(panel.bar_fill(2, 1000).abs() < 1e-9);
        assert!((panel.bar_fill(2, 1500) - 1.0).abs() < 1e-9);
        assert!(panel.bar_fill(7, 1500).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pulse_springs_back() {
        let items = default_items();
        let mut panel = DetailPanel::new(&items, settings(), 0);
        assert!((panel.scale(300) - PULSE_SCALE).abs() < 1e-9);

        panel.tick(300);
        assert!((panel.scale(600) - 1.0).abs() < 1e-9);
        panel.tick(600);
        assert!(panel.release_ms.is_none());
    }

    #[test]
    fn test_empty_items() {
        let mut panel = DetailPanel::new(&[], settings(), 0);
        assert_eq!(panel.active(), None);
        assert_eq!(panel.bar_count(), 0);
        assert_eq!(panel.title_text(), "");
        panel.show(&[], 3, 0);
        assert!(!panel.tick(1000));
    }
}
