use super::geometry::{SlotTable, Transform};
use super::rotation::RotationEngine;
use crate::motion::{Easing, Timing, Tween};

pub const HIGHLIGHT_EASING: Easing = Easing::EaseInOut;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TransformTween {
    from: Transform,
    to: Transform,
    timing: Timing,
}

impl TransformTween {
    fn settled(at: Transform) -> Self {
        Self {
            from: at,
            to: at,
            timing: Timing::instant(0),
        }
    }

    fn sample(&self, now_ms: u64) -> Transform {
        self.from.interpolate(&self.to, self.timing.eased(now_ms))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CardAnimation {
    transform: TransformTween,
    highlight: Tween,
}

/// What one rendered card looks like at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub card: usize,
    pub slot: usize,
    pub content: Option<usize>,
    pub transform: Transform,
    /// 0 = plain card, 1 = fully highlighted.
    pub highlight: f64,
    pub z_index: i32,
    pub is_center: bool,
}

/// Per-card transitions between slot transforms. Each card keeps exactly one
/// transform tween and one highlight tween; starting a new one replaces the old
/// one from the card's sampled position, so the latest target always wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationDriver {
    cards: Vec<CardAnimation>,
}

fn z_index(slot: usize, center: usize) -> i32 {
    100 - slot.abs_diff(center).min(99) as i32
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Puts every card straight onto its slot with no transition.
    pub fn place(&mut self, table: &SlotTable, engine: &RotationEngine) {
        self.cards = (0..table.len())
            .map(|card| {
                let slot = engine.slot_for_card(card);
                let (at, lit) = table
                    .get(slot)
                    .map(|g| (g.transform, if g.is_center { 1.0 } else { 0.0 }))
                    .unwrap_or_default();
                CardAnimation {
                    transform: TransformTween::settled(at),
                    highlight: Tween::settled(lit),
                }
            })
            .collect();
    }

    pub fn retarget(
        &mut self,
        table: &SlotTable,
        engine: &RotationEngine,
        now_ms: u64,
        move_timing: (u64, Easing),
        highlight_ms: u64,
    ) {
        if self.cards.len() != table.len() {
            self.place(table, engine);
            return;
        }

        let (move_ms, easing) = move_timing;
        for (card, anim) in self.cards.iter_mut().enumerate() {
            let Some(geometry) = table.get(engine.slot_for_card(card)) else {
                continue;
            };

            let from = anim.transform.sample(now_ms);
            anim.transform = TransformTween {
                from,
                to: geometry.transform,
                timing: Timing::new(now_ms, move_ms, easing),
            };

            let lit = if geometry.is_center { 1.0 } else { 0.0 };
            anim.highlight
                .retarget(lit, Timing::new(now_ms, highlight_ms, HIGHLIGHT_EASING));
        }
    }

    /// Freezes every card where it is right now.
    pub fn cancel_all(&mut self, now_ms: u64) {
        for anim in &mut self.cards {
            anim.transform = TransformTween::settled(anim.transform.sample(now_ms));
            anim.highlight.freeze(now_ms);
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn is_settled(&self, now_ms: u64) -> bool {
        self.cards.iter().all(|anim| {
            anim.transform.timing.is_finished(now_ms) && anim.highlight.is_finished(now_ms)
        })
    }

    /// Frames in render-index order. Sort by `z_index` before painting.
    pub fn sample(
        &self,
        table: &SlotTable,
        engine: &RotationEngine,
        now_ms: u64,
    ) -> Vec<CardFrame> {
        self.cards
            .iter()
            .enumerate()
            .map(|(card, anim)| {
                let slot = engine.slot_for_card(card);
                CardFrame {
                    card,
                    slot,
                    content: engine.content_for_slot(slot),
                    transform: anim.transform.sample(now_ms),
                    highlight: anim.highlight.value(now_ms),
                    z_index: z_index(slot, table.center()),
                    is_center: slot == table.center(),
                }
            })
            .collect()
    }
}
