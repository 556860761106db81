use super::panel::DetailPanel;
use crate::config::Config;
use reel_core::carousel::{Carousel, Direction, LayoutError, Phase};
use reel_core::protocol::ControlCommand;
use reel_core::selection::{Selection, resolve_label};
use reel_core::types::{ContentItem, card_labels};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Track {
    Vertical,
    Horizontal,
}

/// Which drawing areas need a repaint after an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeckAction {
    pub redraw_vertical: bool,
    pub redraw_horizontal: bool,
    pub redraw_panel: bool,
}

impl DeckAction {
    pub fn new(redraw_vertical: bool, redraw_horizontal: bool, redraw_panel: bool) -> Self {
        Self {
            redraw_vertical,
            redraw_horizontal,
            redraw_panel,
        }
    }

    pub fn all() -> Self {
        Self::new(true, true, true)
    }

    pub fn track(track: Track) -> Self {
        match track {
            Track::Vertical => Self::new(true, false, false),
            Track::Horizontal => Self::new(false, true, false),
        }
    }

    pub fn any(&self) -> bool {
        self.redraw_vertical || self.redraw_horizontal || self.redraw_panel
    }

    pub fn merge(self, other: Self) -> Self {
        Self::new(
            self.redraw_vertical || other.redraw_vertical,
            self.redraw_horizontal || other.redraw_horizontal,
            self.redraw_panel || other.redraw_panel,
        )
    }
}

/// Everything on screen: one selection shared by two carousels and the detail
/// panel. Input from either carousel only proposes an index; the selection
/// decides and both carousels follow it.
pub struct Deck {
    items: Vec<ContentItem>,
    selection: Selection,
    vertical: Carousel,
    horizontal: Carousel,
    panel: DetailPanel,
    nav_delay_ms: u64,
    pending_nav: Option<(usize, u64)>,
}

impl Deck {
    pub fn new(config: &Config, now_ms: u64) -> Result<Self, LayoutError> {
        let items = config.items.clone();
        let labels = card_labels(&items);

        Ok(Self {
            selection: Selection::new(items.len(), config.selection.auto_advance_ms, now_ms),
            vertical: Carousel::new(labels.clone(), config.vertical, &config.gestures)?,
            horizontal: Carousel::new(labels, config.horizontal, &config.gestures)?,
            panel: DetailPanel::new(&items, config.panel, now_ms),
            nav_delay_ms: config.panel.nav_delay_ms,
            pending_nav: None,
            items,
        })
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn panel(&self) -> &DetailPanel {
        &self.panel
    }

    pub fn carousel(&self, track: Track) -> &Carousel {
        match track {
            Track::Vertical => &self.vertical,
            Track::Horizontal => &self.horizontal,
        }
    }

    fn carousel_mut(&mut self, track: Track) -> &mut Carousel {
        match track {
            Track::Vertical => &mut self.vertical,
            Track::Horizontal => &mut self.horizontal,
        }
    }

    /// First call mounts the carousel, later calls rebuild its slot table.
    pub fn resize(&mut self, track: Track, width: f64, now_ms: u64) -> DeckAction {
        let carousel = self.carousel_mut(track);
        match carousel.phase() {
            Phase::Uninitialized => carousel.mount(width, now_ms),
            Phase::Destroyed => return DeckAction::default(),
            Phase::Idle | Phase::Animating => carousel.resize(width, now_ms),
        }
        DeckAction::track(track)
    }

    fn follow_selection(&mut self, now_ms: u64) -> DeckAction {
        let index = self.selection.index();
        self.vertical.sync_to_external_index(index as i64, now_ms);
        self.horizontal.sync_to_external_index(index as i64, now_ms);
        self.panel.show(&self.items, index, now_ms);
        DeckAction::all()
    }

    /// Moves the shared selection. Out-of-range indices wrap.
    pub fn select(&mut self, index: i64, now_ms: u64) -> DeckAction {
        self.pending_nav = None;
        if self.selection.set(index, now_ms) {
            log::debug!("selected item {}", self.selection.index());
            self.follow_selection(now_ms)
        } else {
            DeckAction::default()
        }
    }

    fn request(&mut self, index: Option<usize>, now_ms: u64) -> DeckAction {
        index.map_or_else(DeckAction::default, |index| self.select(index as i64, now_ms))
    }

    pub fn on_wheel(&mut self, delta_y: f64, now_ms: u64) -> DeckAction {
        let Some(command) = self.vertical.on_wheel(delta_y, now_ms) else {
            return DeckAction::default();
        };
        let index = self.vertical.requested_index(command);
        self.request(index, now_ms)
    }

    pub fn on_swipe_begin(&mut self, x: f64, now_ms: u64) {
        self.horizontal.on_swipe_begin(x, now_ms);
    }

    pub fn on_swipe_move(&mut self, x: f64, now_ms: u64) -> DeckAction {
        let Some(command) = self.horizontal.on_swipe_move(x, now_ms) else {
            return DeckAction::default();
        };
        let index = self.horizontal.requested_index(command);
        self.request(index, now_ms)
    }

    pub fn on_swipe_end(&mut self) {
        self.horizontal.on_swipe_end();
    }

    /// Progress bar click: the panel dips first and the selection moves once
    /// the dip has played.
    pub fn navigate(&mut self, index: usize, now_ms: u64) -> DeckAction {
        if index >= self.items.len() || index == self.selection.index() {
            return DeckAction::default();
        }
        self.panel.pulse(now_ms);
        self.pending_nav = Some((index, now_ms.saturating_add(self.nav_delay_ms)));
        DeckAction::new(false, false, true)
    }

    /// Steps both carousels one item at a time. The selection jumps straight to
    /// where the spin ends.
    pub fn spin(&mut self, count: i32, now_ms: u64) -> DeckAction {
        if count == 0 || self.items.is_empty() {
            return DeckAction::default();
        }
        let direction = Direction::from_sign(count as f64);
        let steps = count.unsigned_abs();
        self.vertical.schedule_steps(direction, steps, now_ms);
        self.horizontal.schedule_steps(direction, steps, now_ms);

        let target = self.selection.index() as i64 + count as i64;
        if self.selection.set(target, now_ms) {
            self.panel.show(&self.items, self.selection.index(), now_ms);
        }
        DeckAction::all()
    }

    pub fn handle_command(&mut self, command: &ControlCommand, now_ms: u64) -> DeckAction {
        let current = self.selection.index() as i64;
        match command {
            ControlCommand::Next => self.select(current + 1, now_ms),
            ControlCommand::Prev => self.select(current - 1, now_ms),
            ControlCommand::Select(index) => self.select(*index, now_ms),
            ControlCommand::Focus(label) => {
                if self.items.is_empty() {
                    return DeckAction::default();
                }
                let index = resolve_label(&self.items, label);
                self.select(index as i64, now_ms)
            }
            ControlCommand::Spin(count) => self.spin(*count, now_ms),
            ControlCommand::Show | ControlCommand::Hide => DeckAction::default(),
        }
    }

    /// One frame: delayed navigation, auto-advance, then every animation.
    pub fn tick(&mut self, now_ms: u64) -> DeckAction {
        let mut action = DeckAction::default();

        if let Some((index, due)) = self.pending_nav
            && due <= now_ms
        {
            action = action.merge(self.select(index as i64, now_ms));
        }

        if self.selection.poll(now_ms).is_some() {
            action = action.merge(self.follow_selection(now_ms));
        }

        action.merge(DeckAction::new(
            self.vertical.tick(now_ms),
            self.horizontal.tick(now_ms),
            self.panel.tick(now_ms),
        ))
    }

    /// Rebuilds from a fresh config, keeping the current item when it still
    /// exists and remounting at the current sizes.
    pub fn reload(&mut self, config: &Config, now_ms: u64) -> Result<(), LayoutError> {
        let mut next = Self::new(config, now_ms)?;
        for track in [Track::Vertical, Track::Horizontal] {
            if let Some(width) = self.carousel(track).container_width() {
                next.resize(track, width, now_ms);
            }
        }
        let index = self.selection.index();
        if index < next.items.len() {
            next.select(index as i64, now_ms);
        }
        *self = next;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.selection.pause();
    }

    pub fn resume(&mut self, now_ms: u64) {
        self.selection.resume(now_ms);
    }

    pub fn destroy(&mut self) {
        self.vertical.destroy();
        self.horizontal.destroy();
        self.selection.pause();
        self.panel.stop();
        self.pending_nav = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(now: u64) -> Deck {
        let mut deck = Deck::new(&Config::default(), now).unwrap();
        deck.resize(Track::Vertical, 600.0, now);
        deck.resize(Track::Horizontal, 400.0, now);
        deck
    }

    fn centers(deck: &Deck) -> (Option<usize>, Option<usize>) {
        (
            deck.carousel(Track::Vertical).active_index(),
            deck.carousel(Track::Horizontal).active_index(),
        )
    }

    #[test]
    fn test_wheel_drives_both_carousels() {
        let mut deck = mounted(0);
        let action = deck.on_wheel(120.0, 10);
        assert_eq!(action, DeckAction::all());
        assert_eq!(deck.selection().index(), 1);
        assert_eq!(centers(&deck), (Some(1), Some(1)));
        assert_eq!(deck.panel().active(), Some(1));

        // inside the cooldown
        assert!(!deck.on_wheel(120.0, 50).any());
        assert_eq!(deck.selection().index(), 1);
    }

    #[test]
    fn test_swipe_right_goes_back() {
        let mut deck = mounted(0);
        deck.on_swipe_begin(100.0, 0);
        deck.on_swipe_move(180.0, 5);
        deck.on_swipe_end();
        assert_eq!(deck.selection().index(), 5);
        assert_eq!(centers(&deck), (Some(5), Some(5)));
    }

    #[test]
    fn test_auto_advance_moves_everything() {
        let mut deck = mounted(0);
        assert!(deck.tick(4999).redraw_panel);
        assert_eq!(deck.selection().index(), 0);

        let action = deck.tick(5000);
        assert_eq!(action, DeckAction::all());
        assert_eq!(centers(&deck), (Some(1), Some(1)));
    }

    #[test]
    fn test_manual_select_restarts_auto_advance() {
        let mut deck = mounted(0);
        deck.handle_command(&ControlCommand::Select(3), 4000);
        deck.tick(5000);
        assert_eq!(deck.selection().index(), 3);
        deck.tick(9000);
        assert_eq!(deck.selection().index(), 4);
    }

    #[test]
    fn test_commands() {
        let mut deck = mounted(0);
        deck.handle_command(&ControlCommand::Prev, 0);
        assert_eq!(deck.selection().index(), 5);
        deck.handle_command(&ControlCommand::Next, 0);
        assert_eq!(deck.selection().index(), 0);
        deck.handle_command(&ControlCommand::Select(-2), 0);
        assert_eq!(deck.selection().index(), 4);

        deck.handle_command(&ControlCommand::Focus("analysis & consulting".into()), 0);
        assert_eq!(deck.selection().index(), 2);
        deck.handle_command(&ControlCommand::Focus("Unknown".into()), 0);
        assert_eq!(deck.selection().index(), 0);
        assert_eq!(centers(&deck), (Some(0), Some(0)));

        assert!(!deck.handle_command(&ControlCommand::Show, 0).any());
    }

    #[test]
    fn test_spin_lands_on_selection() {
        let mut deck = mounted(0);
        deck.spin(-3, 100);
        assert_eq!(deck.selection().index(), 3);
        assert_eq!(centers(&deck), (Some(5), Some(5)));

        deck.tick(600);
        deck.tick(1100);
        assert_eq!(centers(&deck), (Some(3), Some(3)));
        deck.tick(3000);
        assert_eq!(centers(&deck), (Some(3), Some(3)));
    }

    #[test]
    fn test_navigate_waits_for_the_dip() {
        let mut deck = mounted(0);
        assert!(deck.navigate(2, 1000).redraw_panel);
        deck.tick(1200);
        assert_eq!(deck.selection().index(), 0);
        deck.tick(1300);
        assert_eq!(deck.selection().index(), 2);
        assert_eq!(centers(&deck), (Some(2), Some(2)));

        assert!(!deck.navigate(2, 2000).any());
        assert!(!deck.navigate(99, 2000).any());
    }

    #[test]
    fn test_select_before_mount_is_kept() {
        let mut deck = Deck::new(&Config::default(), 0).unwrap();
        deck.select(4, 0);
        deck.resize(Track::Vertical, 600.0, 10);
        assert_eq!(deck.carousel(Track::Vertical).active_index(), Some(4));
        assert_eq!(deck.carousel(Track::Horizontal).active_index(), None);
    }

    #[test]
    fn test_reload_keeps_index_and_size() {
        let mut deck = mounted(0);
        deck.select(4, 0);

        let mut config = Config::default();
        config.items.truncate(5);
        deck.reload(&config, 100).unwrap();
        assert_eq!(deck.items().len(), 5);
        assert_eq!(deck.selection().index(), 4);
        assert_eq!(deck.carousel(Track::Vertical).container_width(), Some(600.0));
        assert_eq!(centers(&deck), (Some(4), Some(4)));

        config.items.truncate(2);
        deck.reload(&config, 200).unwrap();
        assert_eq!(deck.selection().index(), 0);
    }

    #[test]
    fn test_destroy_stops_everything() {
        let mut deck = mounted(0);
        deck.destroy();
        assert_eq!(deck.carousel(Track::Vertical).phase(), Phase::Destroyed);
        assert!(!deck.on_wheel(500.0, 10).any());
        assert!(!deck.resize(Track::Horizontal, 300.0, 10).any());
        assert!(!deck.tick(60_000).redraw_vertical);
        assert_eq!(deck.selection().index(), 0);
    }
}
