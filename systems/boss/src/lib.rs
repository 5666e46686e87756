#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Boss controller that selects attacks by phase and pursues the player.

use bayou_core::{BossAttack, BossPhase, BossSnapshot, CellCoord, Command, Heading};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Attack and movement parameters for the boss fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossTuning {
    /// Health at or below which the boss switches to ranged volleys.
    pub second_phase_health: u32,
    /// Health at or below which the boss mixes heavy strikes and volleys.
    pub third_phase_health: u32,
    /// Melee strike used while the boss is healthy.
    pub strike: BossAttack,
    /// Enemy phases the attack gate stays closed after a first-phase strike.
    pub strike_cooldown: u32,
    /// Ranged volley used in the second and third phases.
    pub volley: BossAttack,
    /// Heavier melee strike available in the third phase.
    pub heavy_strike: BossAttack,
    /// Enemy phases the attack gate stays closed after a second- or third-phase attack.
    pub ranged_cooldown: u32,
    /// Enemy phases the movement gate stays closed after a step.
    pub move_cooldown: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            second_phase_health: 60,
            third_phase_health: 30,
            strike: BossAttack::Strike {
                reach: 3,
                damage: 20,
            },
            strike_cooldown: 1,
            volley: BossAttack::Volley { damage: 10 },
            heavy_strike: BossAttack::Strike {
                reach: 4,
                damage: 25,
            },
            ranged_cooldown: 2,
            move_cooldown: 2,
        }
    }
}

impl BossTuning {
    /// Derives the attack phase from the boss's remaining health.
    #[must_use]
    pub const fn phase_for(&self, health: u32) -> BossPhase {
        if health <= self.third_phase_health {
            BossPhase::Third
        } else if health <= self.second_phase_health {
            BossPhase::Second
        } else {
            BossPhase::First
        }
    }
}

/// Pure system that emits boss attack and pursuit commands.
#[derive(Debug)]
pub struct BossController {
    rng: ChaCha8Rng,
    tuning: BossTuning,
}

impl BossController {
    /// Creates a controller whose third-phase coin flips follow `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, BossTuning::default())
    }

    /// Creates a controller with custom tuning.
    #[must_use]
    pub fn with_tuning(seed: u64, tuning: BossTuning) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            tuning,
        }
    }

    /// Tuning the controller applies.
    #[must_use]
    pub const fn tuning(&self) -> &BossTuning {
        &self.tuning
    }

    /// Emits an attack when the attack gate is open, then a step toward the
    /// player when the movement gate is open.
    pub fn handle(&mut self, boss: Option<BossSnapshot>, player: CellCoord, out: &mut Vec<Command>) {
        let Some(boss) = boss.filter(|boss| boss.health > 0) else {
            return;
        };

        if boss.attack_ready {
            let phase = self.tuning.phase_for(boss.health);
            let (attack, cooldown) = match phase {
                BossPhase::First => (self.tuning.strike, self.tuning.strike_cooldown),
                BossPhase::Second => (self.tuning.volley, self.tuning.ranged_cooldown),
                BossPhase::Third => {
                    let attack = if self.rng.gen_bool(0.5) {
                        self.tuning.heavy_strike
                    } else {
                        self.tuning.volley
                    };
                    (attack, self.tuning.ranged_cooldown)
                }
            };
            out.push(Command::BossAttack {
                phase,
                attack,
                cooldown,
            });
        }

        if boss.move_ready {
            if let Some(heading) = Heading::toward(boss.cell, player) {
                out.push(Command::StepBoss {
                    heading,
                    cooldown: self.tuning.move_cooldown,
                });
            }
        }
    }
}
