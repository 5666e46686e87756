use std::collections::VecDeque;

use bayou_core::{CellCoord, CHECKPOINT_CAPACITY};

/// Bounded LIFO of recovery positions; the oldest entry is evicted when full.
#[derive(Clone, Debug, Default)]
pub(crate) struct CheckpointHistory {
    entries: VecDeque<CellCoord>,
}

impl CheckpointHistory {
    /// Pushes a position, returning the evicted oldest entry when at capacity.
    pub(crate) fn record(&mut self, cell: CellCoord) -> Option<CellCoord> {
        let evicted = if self.entries.len() >= CHECKPOINT_CAPACITY {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(cell);
        evicted
    }

    /// Pops the most recent position accepted by `is_free`, discarding newer
    /// entries it rejects.
    pub(crate) fn recover<F>(&mut self, mut is_free: F) -> Option<CellCoord>
    where
        F: FnMut(CellCoord) -> bool,
    {
        while let Some(cell) = self.entries.pop_back() {
            if is_free(cell) {
                return Some(cell);
            }
        }
        None
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
