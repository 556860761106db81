use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn delta(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub fn from_sign(value: f64) -> Self {
        if value < 0.0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

/// Circular index in `[0, n)`. `None` when there is nothing to index.
pub fn normalize_index(index: i64, n: usize) -> Option<usize> {
    (n > 0).then(|| index.rem_euclid(n as i64) as usize)
}

/// Signed step count from `prev` to `next` around a ring of `n`, taking the
/// shorter way. Ties go forward.
pub fn shortest_delta(prev: usize, next: usize, n: usize) -> i64 {
    if n == 0 {
        return 0;
    }
    let n = n as i64;
    let forward = (next as i64 - prev as i64).rem_euclid(n);
    let backward = forward - n;
    if backward.abs() < forward {
        backward
    } else {
        forward
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledSteps {
    direction: Direction,
    remaining: u32,
    next_ms: u64,
    interval_ms: u64,
}

/// Owns the rotation offset of one carousel.
///
/// The item under the center slot is always `offset mod item_count`; both
/// mutations keep that true, so the offset doubles as the active index.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationEngine {
    item_count: usize,
    total_slots: usize,
    center: usize,
    cycle: i64,
    offset: i64,
    scheduled: Option<ScheduledSteps>,
}

impl RotationEngine {
    pub fn new(item_count: usize, total_slots: usize, center: usize) -> Self {
        let total_slots = total_slots.max(1);
        let cycle = (item_count.max(1) * total_slots * 2) as i64;
        debug_assert!(cycle % total_slots as i64 == 0);
        debug_assert!(item_count == 0 || cycle % item_count as i64 == 0);

        Self {
            item_count,
            total_slots,
            center: center % total_slots,
            cycle,
            offset: 0,
            scheduled: None,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub fn center(&self) -> usize {
        self.center
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Wrap period of the offset. A multiple of both the item count and the
    /// slot count, so wrapping never changes a mapping.
    pub fn cycle(&self) -> i64 {
        self.cycle
    }

    pub fn active_index(&self) -> Option<usize> {
        normalize_index(self.offset, self.item_count)
    }

    fn apply(&mut self, delta: i64) {
        self.offset = (self.offset + delta).rem_euclid(self.cycle);
    }

    /// Jumps to `index` the short way round and cancels any scheduled steps.
    /// Returns the applied delta in items.
    pub fn sync_to_external_index(&mut self, index: i64) -> i64 {
        self.scheduled = None;

        let (Some(prev), Some(next)) = (
            self.active_index(),
            normalize_index(index, self.item_count),
        ) else {
            return 0;
        };

        let delta = shortest_delta(prev, next, self.item_count);
        if delta != 0 {
            self.apply(delta);
            log::debug!("rotation sync {prev} -> {next} ({delta:+})");
        }
        delta
    }

    pub fn step_by(&mut self, direction: Direction) {
        self.apply(direction.delta());
    }

    /// Queues `count` single steps, the first one due immediately and the rest
    /// `interval_ms` apart.
    pub fn schedule_steps(
        &mut self,
        direction: Direction,
        count: u32,
        now_ms: u64,
        interval_ms: u64,
    ) {
        self.scheduled = (count > 0).then_some(ScheduledSteps {
            direction,
            remaining: count,
            next_ms: now_ms,
            interval_ms,
        });
    }

    pub fn has_scheduled(&self) -> bool {
        self.scheduled.is_some()
    }

    pub fn cancel_scheduled(&mut self) {
        self.scheduled = None;
    }

    /// Commits every scheduled step due by `now_ms`. Returns how many ran.
    pub fn poll_scheduled(&mut self, now_ms: u64) -> u32 {
        let mut committed = 0;
        while let Some(mut steps) = self.scheduled
            && steps.next_ms <= now_ms
        {
            self.apply(steps.direction.delta());
            committed += 1;
            steps.remaining -= 1;
            steps.next_ms = steps.next_ms.saturating_add(steps.interval_ms);
            self.scheduled = (steps.remaining > 0).then_some(steps);
        }
        committed
    }

    pub fn reset(&mut self) {
        self.offset = 0;
        self.scheduled = None;
    }

    /// Logical slot that render index `card` currently sits in.
    pub fn slot_for_card(&self, card: usize) -> usize {
        let total = self.total_slots as i64;
        let o = self.offset.rem_euclid(total);
        (card as i64 - o + self.center as i64).rem_euclid(total) as usize
    }

    /// Item shown in logical slot `slot`. Content follows the slot, not the card.
    pub fn content_for_slot(&self, slot: usize) -> Option<usize> {
        normalize_index(
            self.offset + slot as i64 - self.center as i64,
            self.item_count,
        )
    }

    pub fn content_for_card(&self, card: usize) -> Option<usize> {
        self.content_for_slot(self.slot_for_card(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(n: usize) -> RotationEngine {
        RotationEngine::new(n, 25, 12)
    }

    #[test]
    fn test_shortest_path_property() {
        for n in 1..=9 {
            for prev in 0..n {
                for next in 0..n {
                    let delta = shortest_delta(prev, next, n);
                    assert!(delta.unsigned_abs() as usize <= n / 2, "n={n} {prev}->{next}");
                    assert_eq!(normalize_index(prev as i64 + delta, n), Some(next));
                }
            }
        }
    }

    #[test]
    fn test_ties_go_forward() {
        assert_eq!(shortest_delta(0, 3, 6), 3);
        assert_eq!(shortest_delta(3, 0, 6), 3);
        assert_eq!(shortest_delta(0, 1, 2), 1);
    }

    #[test]
    fn test_sync_takes_short_way_back() {
        let mut engine = engine(6);
        assert_eq!(engine.active_index(), Some(0));
        assert_eq!(engine.sync_to_external_index(4), -2);
        assert_eq!(engine.active_index(), Some(4));
        assert_eq!(engine.content_for_slot(engine.center()), Some(4));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut engine = engine(6);
        assert_eq!(engine.sync_to_external_index(2), 2);
        assert_eq!(engine.sync_to_external_index(2), 0);
    }

    #[test]
    fn test_sync_normalizes_out_of_range() {
        let mut engine = engine(6);
        assert_eq!(engine.sync_to_external_index(-1), -1);
        assert_eq!(engine.active_index(), Some(5));
        assert_eq!(engine.sync_to_external_index(13), 2);
        assert_eq!(engine.active_index(), Some(1));
    }

    #[test]
    fn test_step_keeps_active_in_sync() {
        let mut engine = engine(6);
        engine.step_by(Direction::Backward);
        assert_eq!(engine.active_index(), Some(5));
        // next sync measures from the stepped position
        assert_eq!(engine.sync_to_external_index(0), 1);
    }

    #[test]
    fn test_cycle_divides_cleanly() {
        for n in 1..=8 {
            let engine = RotationEngine::new(n, 15, 7);
            assert_eq!(engine.cycle() % n as i64, 0);
            assert_eq!(engine.cycle() % 15, 0);
        }
    }

    #[test]
    fn test_mapping_survives_wraparound() {
        let mut engine = engine(6);
        let before: Vec<_> = (0..25)
            .map(|c| (engine.slot_for_card(c), engine.content_for_card(c)))
            .collect();

        for _ in 0..engine.cycle() {
            engine.step_by(Direction::Forward);
        }
        assert_eq!(engine.offset(), 0);

        let after: Vec<_> = (0..25)
            .map(|c| (engine.slot_for_card(c), engine.content_for_card(c)))
            .collect();
        assert_eq!(before, after);

        engine.step_by(Direction::Backward);
        assert_eq!(engine.offset(), engine.cycle() - 1);
        assert_eq!(engine.active_index(), Some(5));
    }

    #[test]
    fn test_mapping_consistency() {
        let mut engine = engine(6);
        for step in 0..120 {
            let offset = engine.offset();
            for card in 0..25 {
                let s = (card as i64 - offset + 12).rem_euclid(25) as usize;
                assert_eq!(engine.slot_for_card(card), s);
                let expected = (offset + s as i64 - 12).rem_euclid(6) as usize;
                assert_eq!(engine.content_for_card(card), Some(expected));
            }
            let direction = if step % 7 < 4 {
                Direction::Forward
            } else {
                Direction::Backward
            };
            engine.step_by(direction);
        }
    }

    #[test]
    fn test_each_slot_holds_one_card() {
        let mut engine = engine(6);
        engine.sync_to_external_index(3);
        let mut slots: Vec<_> = (0..25).map(|c| engine.slot_for_card(c)).collect();
        slots.sort_unstable();
        assert_eq!(slots, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_scheduled_steps() {
        let mut engine = engine(6);
        engine.schedule_steps(Direction::Forward, 3, 1000, 500);

        assert_eq!(engine.poll_scheduled(999), 0);
        assert_eq!(engine.poll_scheduled(1000), 1);
        assert_eq!(engine.poll_scheduled(1400), 0);
        assert_eq!(engine.poll_scheduled(2000), 2);
        assert_eq!(engine.active_index(), Some(3));
        assert!(!engine.has_scheduled());
    }

    #[test]
    fn test_sync_cancels_scheduled_steps() {
        let mut engine = engine(6);
        engine.schedule_steps(Direction::Forward, 4, 0, 500);
        engine.poll_scheduled(0);

        engine.sync_to_external_index(1);
        assert!(!engine.has_scheduled());
        assert_eq!(engine.poll_scheduled(10_000), 0);
        assert_eq!(engine.active_index(), Some(1));
    }

    #[test]
    fn test_empty_list_never_panics() {
        let mut engine = engine(0);
        assert_eq!(engine.active_index(), None);
        assert_eq!(engine.sync_to_external_index(3), 0);
        engine.step_by(Direction::Forward);
        assert_eq!(engine.content_for_card(0), None);
        assert!(engine.slot_for_card(0) < 25);
    }
}
