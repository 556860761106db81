//! Rotating content-slot carousel.
//!
//! A fixed table of slot transforms is computed from the layout. Cards are
//! bound to render indices and glide between slots while labels flow through
//! them, so the picture looks like items travelling along fixed tracks.

pub mod driver;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod rotation;

pub use driver::{AnimationDriver, CardFrame};
pub use geometry::{SlotGeometry, SlotTable, Transform};
pub use gesture::{GestureConfig, RotationCommand, SwipeAdapter, WheelAdapter};
pub use layout::{Anchor, Layout, LayoutError};
pub use rotation::{Direction, RotationEngine, normalize_index, shortest_delta};

use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    Uninitialized,
    Idle,
    Animating,
    Destroyed,
}

pub struct Carousel {
    labels: Vec<String>,
    layout: Layout,
    table: Option<SlotTable>,
    engine: RotationEngine,
    driver: AnimationDriver,
    wheel: WheelAdapter,
    swipe: SwipeAdapter,
    phase: Phase,
    container_width: f64,
}

impl Carousel {
    pub fn new(
        labels: Vec<String>,
        layout: Layout,
        gestures: &GestureConfig,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;
        if labels.is_empty() {
            log::warn!("carousel created without labels; cards will render empty");
        }

        Ok(Self {
            engine: RotationEngine::new(labels.len(), layout.total_slots(), layout.center()),
            wheel: WheelAdapter::new(gestures.wheel_threshold, layout.cooldown_ms()),
            swipe: SwipeAdapter::new(gestures.swipe_threshold, layout.cooldown_ms()),
            labels,
            layout,
            table: None,
            driver: AnimationDriver::new(),
            phase: Phase::Uninitialized,
            container_width: 0.0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, content: Option<usize>) -> Option<&str> {
        content
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }

    pub fn engine(&self) -> &RotationEngine {
        &self.engine
    }

    pub fn table(&self) -> Option<&SlotTable> {
        self.table.as_ref()
    }

    /// Width the slot table was last built for.
    pub fn container_width(&self) -> Option<f64> {
        self.is_ready().then_some(self.container_width)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Animating)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.is_ready()
            .then(|| self.engine.active_index())
            .flatten()
    }

    /// Builds the slot table for the measured container and drops every card
    /// onto its slot without animating.
    pub fn mount(&mut self, container_width: f64, now_ms: u64) {
        if self.phase == Phase::Destroyed {
            return;
        }
        self.container_width = container_width;
        let table = SlotTable::build(&self.layout, container_width);
        self.driver.place(&table, &self.engine);
        self.table = Some(table);
        self.phase = Phase::Idle;
        log::debug!(
            "carousel mounted: {} slots, width {container_width}",
            self.layout.total_slots()
        );
        self.tick(now_ms);
    }

    pub fn resize(&mut self, container_width: f64, now_ms: u64) {
        if !self.is_ready() || (container_width - self.container_width).abs() < f64::EPSILON {
            return;
        }
        self.mount(container_width, now_ms);
    }

    /// Swaps the content list. The old offset means nothing for a different
    /// item count, so everything restarts from the first item.
    pub fn replace_labels(&mut self, labels: Vec<String>, now_ms: u64) {
        self.engine = RotationEngine::new(
            labels.len(),
            self.layout.total_slots(),
            self.layout.center(),
        );
        self.labels = labels;
        self.wheel.reset();
        self.swipe.reset();
        if self.is_ready() {
            self.mount(self.container_width, now_ms);
        }
    }

    fn animate(&mut self, now_ms: u64) {
        let Some(table) = &self.table else {
            return;
        };
        self.driver.retarget(
            table,
            &self.engine,
            now_ms,
            (self.layout.anim_ms, self.layout.easing),
            self.layout.highlight_ms,
        );
        self.phase = if self.driver.is_settled(now_ms) {
            Phase::Idle
        } else {
            Phase::Animating
        };
    }

    /// Rotates to the externally selected item. Before mounting only the
    /// offset moves, so the first placement already shows the right item.
    pub fn sync_to_external_index(&mut self, index: i64, now_ms: u64) -> i64 {
        if self.phase == Phase::Destroyed {
            return 0;
        }
        let delta = self.engine.sync_to_external_index(index);
        if delta != 0 && self.is_ready() {
            self.animate(now_ms);
        }
        delta
    }

    pub fn step_by(&mut self, direction: Direction, now_ms: u64) {
        if !self.is_ready() {
            return;
        }
        self.engine.step_by(direction);
        self.animate(now_ms);
    }

    /// Runs `count` single steps one animation length apart.
    pub fn schedule_steps(&mut self, direction: Direction, count: u32, now_ms: u64) {
        if !self.is_ready() {
            return;
        }
        self.engine
            .schedule_steps(direction, count, now_ms, self.layout.anim_ms);
        self.tick(now_ms);
    }

    pub fn on_wheel(&mut self, delta_y: f64, now_ms: u64) -> Option<RotationCommand> {
        if !self.is_ready() {
            return None;
        }
        self.wheel.on_wheel(delta_y, now_ms)
    }

    pub fn on_swipe_begin(&mut self, x: f64, now_ms: u64) {
        if self.is_ready() {
            self.swipe.begin(x, now_ms);
        }
    }

    pub fn on_swipe_move(&mut self, x: f64, now_ms: u64) -> Option<RotationCommand> {
        if !self.is_ready() {
            return None;
        }
        self.swipe.moved(x, now_ms)
    }

    pub fn on_swipe_end(&mut self) {
        self.swipe.end();
    }

    /// Applies a command directly to this carousel.
    pub fn apply(&mut self, command: RotationCommand, now_ms: u64) {
        match command {
            RotationCommand::Step(direction) => self.step_by(direction, now_ms),
            RotationCommand::JumpTo(index) => {
                self.sync_to_external_index(index as i64, now_ms);
            }
        }
    }

    /// The external index a command asks for, for carousels whose selection is
    /// owned elsewhere.
    pub fn requested_index(&self, command: RotationCommand) -> Option<usize> {
        let count = self.engine.item_count();
        match command {
            RotationCommand::Step(direction) => {
                let active = self.active_index()?;
                normalize_index(active as i64 + direction.delta(), count)
            }
            RotationCommand::JumpTo(index) => normalize_index(index as i64, count),
        }
    }

    /// Advances scheduled steps and settles finished animations. Returns whether
    /// the carousel needs repainting.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.is_ready() {
            return false;
        }
        let was_animating = self.phase == Phase::Animating;

        if self.engine.poll_scheduled(now_ms) > 0 {
            self.animate(now_ms);
        }

        if self.phase == Phase::Animating && self.driver.is_settled(now_ms) {
            self.phase = Phase::Idle;
        }

        was_animating || self.phase == Phase::Animating
    }

    pub fn frames(&self, now_ms: u64) -> Vec<CardFrame> {
        match (&self.table, self.is_ready()) {
            (Some(table), true) => self.driver.sample(table, &self.engine, now_ms),
            _ => Vec::new(),
        }
    }

    /// Tears down: pending steps, cooldowns and transitions are dropped and
    /// nothing responds afterwards.
    pub fn destroy(&mut self) {
        self.engine.reset();
        self.driver.clear();
        self.wheel.reset();
        self.swipe.reset();
        self.table = None;
        self.phase = Phase::Destroyed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item {i}")).collect()
    }

    fn mounted(n: usize) -> Carousel {
        let mut carousel =
            Carousel::new(labels(n), Layout::vertical(), &GestureConfig::default()).unwrap();
        carousel.mount(600.0, 0);
        carousel
    }

    fn center_label(carousel: &Carousel, now: u64) -> Option<String> {
        carousel
            .frames(now)
            .into_iter()
            .find(|f| f.is_center)
            .and_then(|f| carousel.label(f.content).map(str::to_owned))
    }

    #[test]
    fn test_lifecycle() {
        let mut carousel =
            Carousel::new(labels(6), Layout::vertical(), &GestureConfig::default()).unwrap();
        assert_eq!(carousel.phase(), Phase::Uninitialized);
        assert!(carousel.frames(0).is_empty());

        carousel.mount(600.0, 0);
        assert_eq!(carousel.phase(), Phase::Idle);
        assert_eq!(carousel.frames(0).len(), 25);

        carousel.sync_to_external_index(2, 100);
        assert_eq!(carousel.phase(), Phase::Animating);
        assert!(carousel.tick(300));
        assert_eq!(carousel.phase(), Phase::Animating);
        assert!(carousel.tick(600));
        assert_eq!(carousel.phase(), Phase::Idle);
        assert!(!carousel.tick(700));

        carousel.destroy();
        assert_eq!(carousel.phase(), Phase::Destroyed);
        assert!(carousel.frames(700).is_empty());
        assert_eq!(carousel.sync_to_external_index(4, 800), 0);
        carousel.mount(600.0, 900);
        assert_eq!(carousel.phase(), Phase::Destroyed);
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let layout = Layout {
            repeats: 0,
            ..Layout::vertical()
        };
        assert!(matches!(
            Carousel::new(labels(3), layout, &GestureConfig::default()),
            Err(LayoutError::NoRepeats)
        ));
    }

    #[test]
    fn test_sync_before_mount_places_directly() {
        let mut carousel =
            Carousel::new(labels(6), Layout::vertical(), &GestureConfig::default()).unwrap();
        assert_eq!(carousel.sync_to_external_index(3, 0), 3);
        assert_eq!(carousel.phase(), Phase::Uninitialized);

        carousel.mount(600.0, 10);
        assert_eq!(carousel.phase(), Phase::Idle);
        assert_eq!(center_label(&carousel, 10).as_deref(), Some("item 3"));
    }

    #[test]
    fn test_center_shows_active_item() {
        let mut carousel = mounted(6);
        for (i, target) in [4, 1, 5, 5, 0, 3].into_iter().enumerate() {
            let now = i as u64 * 1000;
            carousel.sync_to_external_index(target, now);
            assert_eq!(carousel.active_index(), Some(target as usize));
            assert_eq!(
                center_label(&carousel, now + 600),
                Some(format!("item {target}"))
            );
        }
    }

    #[test]
    fn test_gestures_ignored_until_mounted() {
        let mut carousel =
            Carousel::new(labels(6), Layout::vertical(), &GestureConfig::default()).unwrap();
        assert_eq!(carousel.on_wheel(500.0, 0), None);
        carousel.on_swipe_begin(0.0, 0);
        assert_eq!(carousel.on_swipe_move(-100.0, 1), None);
        carousel.step_by(Direction::Forward, 0);
        assert_eq!(carousel.engine().offset(), 0);
        let step = RotationCommand::Step(Direction::Forward);
        assert_eq!(carousel.requested_index(step), None);
    }

    #[test]
    fn test_two_wheel_gestures_in_cooldown_commit_one_step() {
        let mut carousel = mounted(6);
        let mut committed = 0;
        for now in [0, 50] {
            if let Some(command) = carousel.on_wheel(120.0, now) {
                carousel.apply(command, now);
                committed += 1;
            }
        }
        assert_eq!(committed, 1);
        assert_eq!(carousel.active_index(), Some(1));
    }

    #[test]
    fn test_requested_index_wraps() {
        let mut carousel = mounted(6);
        let back = RotationCommand::Step(Direction::Backward);
        assert_eq!(carousel.requested_index(back), Some(5));
        assert_eq!(carousel.requested_index(RotationCommand::JumpTo(8)), Some(2));

        carousel.apply(RotationCommand::JumpTo(5), 0);
        let fwd = RotationCommand::Step(Direction::Forward);
        assert_eq!(carousel.requested_index(fwd), Some(0));
    }

    #[test]
    fn test_scheduled_steps_run_one_animation_apart() {
        let mut carousel = mounted(6);
        carousel.schedule_steps(Direction::Forward, 3, 0);
        assert_eq!(carousel.active_index(), Some(1));

        carousel.tick(499);
        assert_eq!(carousel.active_index(), Some(1));
        carousel.tick(500);
        assert_eq!(carousel.active_index(), Some(2));

        // an external sync wins over the remaining step
        carousel.sync_to_external_index(0, 600);
        carousel.tick(1000);
        carousel.tick(5000);
        assert_eq!(carousel.active_index(), Some(0));
        assert_eq!(carousel.phase(), Phase::Idle);
    }

    #[test]
    fn test_empty_labels_render_placeholders() {
        let mut carousel = mounted(0);
        assert_eq!(carousel.active_index(), None);
        assert_eq!(carousel.sync_to_external_index(2, 0), 0);
        carousel.step_by(Direction::Forward, 0);

        let frames = carousel.frames(1000);
        assert_eq!(frames.len(), 25);
        assert!(frames.iter().all(|f| carousel.label(f.content).is_none()));
    }

    #[test]
    fn test_resize_replaces_cards() {
        let mut carousel = mounted(6);
        carousel.sync_to_external_index(2, 0);
        carousel.resize(900.0, 100);
        assert_eq!(carousel.phase(), Phase::Idle);
        assert_eq!(center_label(&carousel, 100).as_deref(), Some("item 2"));

        let shift = carousel.table().unwrap().base_left();
        carousel.resize(600.0, 200);
        assert!((shift - carousel.table().unwrap().base_left() - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_replace_labels_restarts_rotation() {
        let mut carousel = mounted(6);
        carousel.sync_to_external_index(4, 0);
        carousel.replace_labels(labels(3), 1000);
        assert_eq!(carousel.active_index(), Some(0));
        assert_eq!(carousel.engine().cycle() % 3, 0);
        assert_eq!(center_label(&carousel, 1000).as_deref(), Some("item 0"));
    }
}
