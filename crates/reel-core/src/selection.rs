use crate::carousel::normalize_index;
use crate::types::ContentItem;

pub const AUTO_ADVANCE_MS: u64 = 5000;

/// The item everything on screen agrees on. Both carousels and the detail
/// panel follow it; it moves on its own every `interval_ms` unless someone
/// picks an item, which restarts the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    total: usize,
    interval_ms: u64,
    next_advance_ms: Option<u64>,
}

impl Selection {
    pub fn new(total: usize, interval_ms: u64, now_ms: u64) -> Self {
        let mut selection = Self {
            index: 0,
            total,
            interval_ms,
            next_advance_ms: None,
        };
        selection.restart_timer(now_ms);
        selection
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn restart_timer(&mut self, now_ms: u64) {
        self.next_advance_ms = (self.total > 0 && self.interval_ms > 0)
            .then(|| now_ms.saturating_add(self.interval_ms));
    }

    /// Picks `index` (wrapped into range). Returns whether the index changed.
    pub fn set(&mut self, index: i64, now_ms: u64) -> bool {
        let Some(next) = normalize_index(index, self.total) else {
            return false;
        };
        self.restart_timer(now_ms);
        let changed = next != self.index;
        self.index = next;
        changed
    }

    pub fn advance(&mut self, steps: i64, now_ms: u64) -> bool {
        self.set(self.index as i64 + steps, now_ms)
    }

    /// Applies any auto-advance that fell due. Returns the new index if it moved.
    pub fn poll(&mut self, now_ms: u64) -> Option<usize> {
        let due = self.next_advance_ms?;
        if now_ms < due {
            return None;
        }
        self.index = normalize_index(self.index as i64 + 1, self.total)?;
        // keep the cadence of the original due time; missed periods are skipped
        let periods = (now_ms - due) / self.interval_ms + 1;
        self.next_advance_ms = Some(due.saturating_add(self.interval_ms.saturating_mul(periods)));
        Some(self.index)
    }

    /// Adopts a new item count, keeping the index when it still fits.
    pub fn resize(&mut self, total: usize, now_ms: u64) {
        self.total = total;
        if self.index >= total {
            self.index = 0;
        }
        self.restart_timer(now_ms);
    }

    pub fn pause(&mut self) {
        self.next_advance_ms = None;
    }

    pub fn resume(&mut self, now_ms: u64) {
        self.restart_timer(now_ms);
    }
}

/// Finds the item whose title matches `label`, ignoring case. Unknown labels
/// land on the first item.
pub fn resolve_label(items: &[ContentItem], label: &str) -> usize {
    let wanted = label.trim();
    items
        .iter()
        .position(|item| item.title.eq_ignore_ascii_case(wanted))
        .unwrap_or_else(|| {
            log::warn!("unknown label '{wanted}', falling back to the first item");
            0
        })
}
