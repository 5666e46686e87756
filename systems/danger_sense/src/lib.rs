#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Proximity system that warns the player about lurking enemies.

use bayou_core::{CellCoord, Command, CrocodileView, SnakeView};

/// Emits a danger warning when a crocodile or snake is close to the player.
#[derive(Debug, Default)]
pub struct DangerSense;

impl DangerSense {
    /// Creates a new danger sense system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `Command::WarnOfDanger` for the nearest enemy within `radius`
    /// (Chebyshev distance) of the player.
    pub fn handle(
        &mut self,
        crocodiles: &CrocodileView,
        snakes: &SnakeView,
        player: CellCoord,
        radius: u32,
        out: &mut Vec<Command>,
    ) {
        let nearest = crocodiles
            .iter()
            .map(|crocodile| crocodile.cell)
            .chain(snakes.iter().map(|snake| snake.cell))
            .map(|cell| (cell.chebyshev_distance(player), cell))
            .filter(|(distance, _)| *distance <= radius)
            .min();

        if let Some((_, nearest)) = nearest {
            out.push(Command::WarnOfDanger { nearest });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayou_core::{CrocodileSnapshot, EnemyId, SnakeSnapshot};

    #[test]
    fn warns_about_the_nearest_enemy_in_range() {
        let crocodiles = CrocodileView::from_snapshots(vec![CrocodileSnapshot {
            id: EnemyId::new(0),
            cell: CellCoord::new(9, 9),
            health: 2,
            next_waypoint: None,
        }]);
        let snakes = SnakeView::from_snapshots(vec![SnakeSnapshot {
            id: EnemyId::new(1),
            cell: CellCoord::new(7, 3),
            health: 2,
            charge: 0,
            ready: false,
        }]);
        let mut out = Vec::new();

        DangerSense::new().handle(&crocodiles, &snakes, CellCoord::new(4, 4), 5, &mut out);

        assert_eq!(
            out,
            vec![Command::WarnOfDanger {
                nearest: CellCoord::new(7, 3)
            }]
        );
    }

    #[test]
    fn enemies_outside_the_radius_are_ignored() {
        let crocodiles = CrocodileView::from_snapshots(vec![CrocodileSnapshot {
            id: EnemyId::new(0),
            cell: CellCoord::new(10, 0),
            health: 2,
            next_waypoint: None,
        }]);
        let mut out = Vec::new();

        DangerSense::new().handle(
            &crocodiles,
            &SnakeView::default(),
            CellCoord::new(4, 0),
            5,
            &mut out,
        );

        assert!(out.is_empty());
    }
}
