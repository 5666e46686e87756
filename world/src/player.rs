use bayou_core::CellCoord;

use crate::{checkpoints::CheckpointHistory, inventory::Inventory};

/// Status message shown after a turn.
///
/// The line is cleared when a turn begins and every later write replaces the
/// previous one, so only the most recent event of the turn stays visible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StatusLine {
    message: Option<String>,
}

impl StatusLine {
    pub(crate) fn begin_turn(&mut self) {
        self.message = None;
    }

    pub(crate) fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Writes only when nothing else has been reported this turn.
    pub(crate) fn set_if_quiet(&mut self, message: impl Into<String>) -> bool {
        if self.message.is_some() {
            return false;
        }
        self.set(message);
        true
    }

    pub(crate) fn as_str(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// The player's position is tracked here rather than by scanning the grid.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) cell: CellCoord,
    pub(crate) health: i32,
    pub(crate) score: u32,
    pub(crate) inventory: Inventory,
    pub(crate) status: StatusLine,
    pub(crate) checkpoints: CheckpointHistory,
    pub(crate) has_weapon: bool,
    pub(crate) ready_for_boss: bool,
}

impl Player {
    pub(crate) fn new(cell: CellCoord, health: i32) -> Self {
        Self {
            cell,
            health,
            score: 0,
            inventory: Inventory::default(),
            status: StatusLine::default(),
            checkpoints: CheckpointHistory::default(),
            has_weapon: false,
            ready_for_boss: false,
        }
    }

    pub(crate) const fn is_dead(&self) -> bool {
        self.health <= 0
    }
}
