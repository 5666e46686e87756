#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that walks crocodiles around their patrol loops.

use bayou_core::{CellCoord, Command, CrocodileView, Terrain};

/// Crocodile controller that proposes one patrol step per crocodile each enemy phase.
#[derive(Debug, Default)]
pub struct CrocodilePatrol {
    scratch: Vec<Command>,
}

impl CrocodilePatrol {
    /// Creates a new patrol system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a step toward the front waypoint of every crocodile whose
    /// waypoint is open ground, and a hold for every other crocodile.
    ///
    /// Both commands rotate the loop so the patrol repeats forever.
    pub fn handle<F>(
        &mut self,
        crocodiles: &CrocodileView,
        player: CellCoord,
        terrain_at: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(CellCoord) -> Option<Terrain>,
    {
        self.scratch.clear();

        for crocodile in crocodiles.iter() {
            let command = match crocodile.next_waypoint {
                Some(to) if to != player && terrain_at(to) == Some(Terrain::OpenGround) => {
                    Command::StepCrocodile {
                        crocodile: crocodile.id,
                        to,
                    }
                }
                _ => Command::HoldCrocodile {
                    crocodile: crocodile.id,
                },
            };
            self.scratch.push(command);
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
