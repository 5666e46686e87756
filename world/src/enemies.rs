use std::collections::VecDeque;

use bayou_core::{BossPhase, CellCoord, EnemyId};

/// Crocodile patrolling a fixed loop captured at spawn time.
#[derive(Clone, Debug)]
pub(crate) struct Crocodile {
    pub(crate) id: EnemyId,
    pub(crate) cell: CellCoord,
    route: VecDeque<CellCoord>,
}

impl Crocodile {
    pub(crate) fn new(id: EnemyId, cell: CellCoord, route: Vec<CellCoord>) -> Self {
        Self {
            id,
            cell,
            route: route.into(),
        }
    }

    pub(crate) fn next_waypoint(&self) -> Option<CellCoord> {
        self.route.front().copied()
    }

    /// Moves the front waypoint to the back so the loop repeats forever.
    pub(crate) fn rotate_route(&mut self) -> Option<CellCoord> {
        let waypoint = self.route.pop_front()?;
        self.route.push_back(waypoint);
        Some(waypoint)
    }
}

/// Stationary snake accumulating charge between shots.
#[derive(Clone, Debug)]
pub(crate) struct Snake {
    pub(crate) id: EnemyId,
    pub(crate) cell: CellCoord,
    pub(crate) charge: u32,
}

impl Snake {
    pub(crate) const fn new(id: EnemyId, cell: CellCoord) -> Self {
        Self { id, cell, charge: 0 }
    }
}

/// Countdown that keeps an action closed for a number of enemy phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cooldown {
    remaining: u32,
    ready: bool,
}

impl Cooldown {
    /// Advances one enemy phase and opens the gate once the countdown is spent.
    pub(crate) fn tick(&mut self) {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.ready = false;
        } else {
            self.ready = true;
        }
    }

    pub(crate) const fn is_ready(&self) -> bool {
        self.ready
    }

    pub(crate) fn reset(&mut self, phases: u32) {
        self.remaining = phases;
        self.ready = false;
    }
}

/// Singleton boss active only inside the arena.
#[derive(Clone, Debug)]
pub(crate) struct Boss {
    pub(crate) id: EnemyId,
    pub(crate) cell: CellCoord,
    pub(crate) health: u32,
    pub(crate) phase: BossPhase,
    pub(crate) attack: Cooldown,
    pub(crate) movement: Cooldown,
}

impl Boss {
    pub(crate) fn new(id: EnemyId, cell: CellCoord, health: u32) -> Self {
        Self {
            id,
            cell,
            health,
            phase: BossPhase::First,
            attack: Cooldown::default(),
            movement: Cooldown::default(),
        }
    }

    pub(crate) const fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patrol_loop_never_shrinks() {
        let route = vec![
            CellCoord::new(3, 3),
            CellCoord::new(4, 3),
            CellCoord::new(4, 4),
            CellCoord::new(3, 4),
        ];
        let mut crocodile = Crocodile::new(EnemyId::new(1), route[0], route.clone());

        let visited: Vec<_> = (0..8).filter_map(|_| crocodile.rotate_route()).collect();
        assert_eq!(&visited[..4], &route[..]);
        assert_eq!(&visited[4..], &route[..]);
        assert_eq!(crocodile.next_waypoint(), Some(route[0]));
    }

    #[test]
    fn cooldown_gate_opens_after_spent_phases() {
        let mut gate = Cooldown::default();
        gate.tick();
        assert!(gate.is_ready());

        gate.reset(2);
        gate.tick();
        assert!(!gate.is_ready());
        gate.tick();
        assert!(!gate.is_ready());
        gate.tick();
        assert!(gate.is_ready());
    }
}
