#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that lets charged snakes fire at the player.

use bayou_core::{CellCoord, Command, Direction, SnakeView};

/// Snake controller that queues shots for snakes whose charge is complete.
#[derive(Debug, Default)]
pub struct SnakeSniper {
    scratch: Vec<Command>,
}

impl SnakeSniper {
    /// Creates a new sniper system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireSnake` entries for ready snakes, aimed at the player.
    pub fn handle(&mut self, snakes: &SnakeView, player: CellCoord, out: &mut Vec<Command>) {
        self.scratch.clear();

        for snake in snakes.iter().filter(|snake| snake.ready) {
            self.scratch.push(Command::FireSnake {
                snake: snake.id,
                direction: aim(snake.cell, player),
            });
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

/// Picks the axis of greatest displacement toward `target`.
///
/// Vertical wins only when the row offset is strictly larger; ties and
/// purely vertical offsets of zero fall back to the horizontal axis.
#[must_use]
pub fn aim(from: CellCoord, target: CellCoord) -> Direction {
    let row_offset = i64::from(target.row()) - i64::from(from.row());
    let column_offset = i64::from(target.column()) - i64::from(from.column());

    if row_offset.abs() > column_offset.abs() {
        if row_offset > 0 {
            Direction::South
        } else {
            Direction::North
        }
    } else if column_offset > 0 {
        Direction::East
    } else {
        Direction::West
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayou_core::{EnemyId, SnakeSnapshot};

    fn snake(id: u32, cell: CellCoord, ready: bool) -> SnakeSnapshot {
        SnakeSnapshot {
            id: EnemyId::new(id),
            cell,
            health: 2,
            charge: if ready { 4 } else { 1 },
            ready,
        }
    }

    #[test]
    fn aims_along_the_dominant_axis() {
        let origin = CellCoord::new(5, 5);
        assert_eq!(aim(origin, CellCoord::new(6, 9)), Direction::South);
        assert_eq!(aim(origin, CellCoord::new(4, 1)), Direction::North);
        assert_eq!(aim(origin, CellCoord::new(9, 6)), Direction::East);
        assert_eq!(aim(origin, CellCoord::new(1, 5)), Direction::West);
    }

    #[test]
    fn diagonal_ties_prefer_the_horizontal_axis() {
        assert_eq!(
            aim(CellCoord::new(2, 2), CellCoord::new(4, 4)),
            Direction::East
        );
        assert_eq!(
            aim(CellCoord::new(2, 2), CellCoord::new(0, 0)),
            Direction::West
        );
    }

    #[test]
    fn only_ready_snakes_fire() {
        let mut system = SnakeSniper::new();
        let view = SnakeView::from_snapshots(vec![
            snake(3, CellCoord::new(8, 2), true),
            snake(1, CellCoord::new(0, 0), false),
        ]);
        let mut out = Vec::new();

        system.handle(&view, CellCoord::new(2, 2), &mut out);

        assert_eq!(
            out,
            vec![Command::FireSnake {
                snake: EnemyId::new(3),
                direction: Direction::West,
            }]
        );
    }
}
