#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Bayou engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, the enemy controllers and the turn engine. Adapters
//! translate raw input into [`PlayerCommand`] values, the turn engine turns
//! those and the controllers' proposals into [`Command`] values, the world
//! executes them via its `apply` entry point, and then broadcasts [`Event`]
//! values describing what happened. Controllers consume immutable snapshots
//! and respond exclusively with new command batches.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Bayou.";

/// Maximum number of recovery positions retained by the checkpoint history.
pub const CHECKPOINT_CAPACITY: usize = 3;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Opens a new turn: advances the turn counter and clears the status line.
    BeginTurn,
    /// Opens the enemy phase: charges snakes and evaluates the boss cooldown gates.
    BeginEnemyPhase,
    /// Requests that a crocodile advance to the next waypoint of its patrol loop.
    StepCrocodile {
        /// Identifier of the crocodile attempting to move.
        crocodile: EnemyId,
        /// Waypoint the crocodile expects to enter.
        to: CellCoord,
    },
    /// Rotates a crocodile's patrol loop without moving it.
    HoldCrocodile {
        /// Identifier of the crocodile that waits this turn.
        crocodile: EnemyId,
    },
    /// Requests that a charged snake fire along the provided direction.
    FireSnake {
        /// Identifier of the firing snake.
        snake: EnemyId,
        /// Axis along which the shot travels.
        direction: Direction,
    },
    /// Requests that the boss perform an attack.
    BossAttack {
        /// Phase the boss controller derived from the boss health.
        phase: BossPhase,
        /// Attack pattern selected for this phase.
        attack: BossAttack,
        /// Number of enemy phases the attack gate stays closed afterwards.
        cooldown: u32,
    },
    /// Requests that the boss take one step toward the player.
    StepBoss {
        /// Unit step the boss attempts.
        heading: Heading,
        /// Number of enemy phases the movement gate stays closed afterwards.
        cooldown: u32,
    },
    /// Moves the player one cell in the provided direction.
    MovePlayer {
        /// Direction of travel.
        direction: Direction,
    },
    /// Fires one round from the player's position.
    FirePlayer {
        /// Direction of the shot.
        direction: Direction,
    },
    /// Clears the thorns adjacent to the player using an axe.
    BreakObstacle {
        /// Direction of the thorns relative to the player.
        direction: Direction,
    },
    /// Consumes a health pack to restore health.
    UseHealthPack,
    /// Lists the player's inventory.
    ShowInventory,
    /// Voluntarily returns to the most recent checkpoint.
    RecoverCheckpoint,
    /// Reports nearby danger unless another event already claimed the status line.
    WarnOfDanger {
        /// Enemy-occupied cell closest to the player.
        nearest: CellCoord,
    },
    /// Resolves the player's death by recovering from the checkpoint history.
    ResolveDeath,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that a new turn started.
    TurnStarted {
        /// One-based index of the turn.
        turn: u64,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
    },
    /// Reports that the player bumped into terrain that cannot be entered.
    PlayerBlocked {
        /// Cell that rejected the move.
        cell: CellCoord,
        /// Terrain occupying the cell.
        terrain: Terrain,
    },
    /// Reports that the player lost health.
    PlayerDamaged {
        /// Health removed by the hit.
        amount: i32,
        /// Origin of the damage.
        source: DamageSource,
        /// Player health after the hit.
        health: i32,
    },
    /// Reports that the player regained health.
    PlayerHealed {
        /// Health restored.
        amount: i32,
        /// Player health after healing.
        health: i32,
    },
    /// Confirms that an item was added to the inventory.
    ItemCollected {
        /// Kind of item collected.
        item: ItemKind,
        /// Number of units added.
        quantity: u32,
    },
    /// Confirms that one unit of an item was consumed.
    ItemConsumed {
        /// Kind of item consumed.
        item: ItemKind,
    },
    /// Confirms that a checkpoint was stored in the history.
    CheckpointRecorded {
        /// Recorded cell.
        cell: CellCoord,
        /// Oldest entry dropped to respect the capacity, if any.
        evicted: Option<CellCoord>,
    },
    /// Confirms that the player returned to a recorded checkpoint.
    CheckpointRestored {
        /// Cell the player was returned to.
        cell: CellCoord,
    },
    /// Reports that the player died after every checkpoint was spent.
    CheckpointsExhausted,
    /// Confirms that the player came back to life at a checkpoint.
    PlayerRespawned {
        /// Cell the player respawned on.
        cell: CellCoord,
        /// Health granted after respawning.
        health: i32,
    },
    /// Describes the straight-line flight of a projectile.
    ProjectileTraced {
        /// Actor that fired the projectile.
        shooter: Shooter,
        /// Open cells crossed by the projectile, in flight order.
        path: Vec<CellCoord>,
        /// What stopped the projectile.
        hit: RayHit,
    },
    /// Reports that an enemy survived a hit.
    EnemyHit {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Kind of enemy hit.
        kind: EnemyKind,
        /// Cell occupied by the enemy.
        cell: CellCoord,
        /// Hits (or boss health) remaining.
        remaining: u32,
    },
    /// Reports that an enemy was defeated.
    EnemyDefeated {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Kind of enemy defeated.
        kind: EnemyKind,
        /// Cell the enemy occupied, now open ground.
        cell: CellCoord,
        /// Score awarded to the player.
        bounty: u32,
    },
    /// Confirms that a crocodile advanced along its patrol loop.
    CrocodileMoved {
        /// Identifier of the crocodile.
        crocodile: EnemyId,
        /// Cell the crocodile left.
        from: CellCoord,
        /// Cell the crocodile entered.
        to: CellCoord,
    },
    /// Confirms that the boss advanced toward the player.
    BossMoved {
        /// Cell the boss left.
        from: CellCoord,
        /// Cell the boss entered.
        to: CellCoord,
    },
    /// Announces that the boss switched to a new attack phase.
    BossPhaseChanged {
        /// Phase that became active.
        phase: BossPhase,
    },
    /// Confirms that thorns were cleared with an axe.
    ThornsCleared {
        /// Cell that became open ground.
        cell: CellCoord,
    },
    /// Reports that the player stands on the portal.
    PortalReached {
        /// Portal cell.
        cell: CellCoord,
    },
    /// Confirms that the explored grid was replaced by the boss arena.
    ArenaEntered {
        /// Cell where the player starts the fight.
        start: CellCoord,
        /// Cell the boss occupies.
        boss: CellCoord,
    },
    /// Reports a non-fatal failure of the player's action.
    ActionFailed {
        /// Reason the action failed.
        failure: ActionFailure,
    },
    /// Lists the inventory in display order.
    InventoryShown {
        /// Entries currently held.
        entries: Vec<InventoryEntry>,
    },
    /// Reports that an enemy lurks within the danger radius.
    DangerSensed {
        /// Closest enemy-occupied cell.
        nearest: CellCoord,
    },
}

/// Discrete command supplied by the input collaborator once per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Move one cell.
    Move(Direction),
    /// Fire one round in a direction.
    Fire(Direction),
    /// List the inventory.
    OpenInventory,
    /// Consume a health pack.
    UseHealthPack,
    /// Clear adjacent thorns with an axe.
    BreakObstacle(Direction),
    /// Return to the most recent checkpoint.
    Recover,
    /// End the session.
    Quit,
}

/// Answer to the prompt raised when the player reaches the portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalChoice {
    /// Leave the explored map for the boss arena.
    EnterArena,
    /// Stay on the explored map.
    KeepExploring,
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Computes the Chebyshev distance, counting diagonal neighbours as adjacent.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.column()
            .abs_diff(other.column())
            .max(self.row().abs_diff(other.row()))
    }

    /// Returns the cell one step along `heading`, or `None` outside a
    /// `columns` by `rows` grid.
    #[must_use]
    pub fn step(self, heading: Heading, columns: u32, rows: u32) -> Option<CellCoord> {
        let column = offset(self.column, heading.column_step())?;
        let row = offset(self.row, heading.row_step())?;
        if column < columns && row < rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }
}

fn offset(value: u32, step: i8) -> Option<u32> {
    match step.signum() {
        -1 => value.checked_sub(1),
        1 => value.checked_add(1),
        _ => Some(value),
    }
}

/// Cardinal directions of the grid's 4-neighbour topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing column indices.
    East,
    /// Toward increasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in neighbour-table order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position of the direction within [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Unit step in any of the eight compass directions.
///
/// Cardinal headings come from [`Direction`]; diagonal headings only arise
/// when the boss aims or walks straight at the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    row_step: i8,
    column_step: i8,
}

impl Heading {
    /// Creates a heading from per-axis steps, clamped to `-1..=1`.
    #[must_use]
    pub const fn new(row_step: i8, column_step: i8) -> Self {
        Self {
            row_step: row_step.signum(),
            column_step: column_step.signum(),
        }
    }

    /// Sign vector pointing from `from` toward `to`, or `None` when they coincide.
    #[must_use]
    pub fn toward(from: CellCoord, to: CellCoord) -> Option<Self> {
        let heading = Self::new(axis_sign(from.row(), to.row()), axis_sign(from.column(), to.column()));
        if heading.is_stationary() {
            None
        } else {
            Some(heading)
        }
    }

    /// Step applied to the row index.
    #[must_use]
    pub const fn row_step(&self) -> i8 {
        self.row_step
    }

    /// Step applied to the column index.
    #[must_use]
    pub const fn column_step(&self) -> i8 {
        self.column_step
    }

    /// Reports whether the heading never leaves its origin.
    #[must_use]
    pub const fn is_stationary(&self) -> bool {
        self.row_step == 0 && self.column_step == 0
    }
}

impl From<Direction> for Heading {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::new(-1, 0),
            Direction::East => Self::new(0, 1),
            Direction::South => Self::new(1, 0),
            Direction::West => Self::new(0, -1),
        }
    }
}

fn axis_sign(from: u32, to: u32) -> i8 {
    match to.cmp(&from) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Enumerated category of a cell's current content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Walkable ground with nothing on it.
    OpenGround,
    /// Impassable brush that hurts on contact; an axe clears it.
    Thorns,
    /// Impassable wall.
    Wall,
    /// Cell occupied by a patrolling crocodile.
    Crocodile,
    /// Cell occupied by a sniping snake.
    Snake,
    /// Food that heals when collected.
    Food,
    /// Weapon pickup that grants ammunition.
    WeaponPickup,
    /// Projectile in flight; only ever shown by renderers.
    Projectile,
    /// Axe used to clear thorns.
    Axe,
    /// Health pack stored for later use.
    HealthPack,
    /// Gateway to the boss arena.
    Portal,
    /// Cell occupied by the boss.
    Boss,
    /// Checkpoint that is recorded when entered.
    Checkpoint,
}

impl Terrain {
    /// Reports whether an enemy occupies the cell.
    #[must_use]
    pub const fn is_enemy(self) -> bool {
        matches!(self, Self::Crocodile | Self::Snake | Self::Boss)
    }

    /// Reports whether the cell blocks or harms a player who walks into it.
    #[must_use]
    pub const fn is_hazard(self) -> bool {
        matches!(
            self,
            Self::Thorns | Self::Wall | Self::Crocodile | Self::Snake | Self::Boss | Self::Projectile
        )
    }

    /// Reports whether the cell reverts to open ground once the player enters it.
    #[must_use]
    pub const fn is_consumed_on_entry(self) -> bool {
        matches!(
            self,
            Self::Food | Self::WeaponPickup | Self::Axe | Self::HealthPack | Self::Checkpoint
        )
    }

    /// Item granted when the player enters the cell, if any.
    #[must_use]
    pub const fn pickup(self) -> Option<ItemKind> {
        match self {
            Self::WeaponPickup => Some(ItemKind::Bullets),
            Self::Axe => Some(ItemKind::Axe),
            Self::Food => Some(ItemKind::Food),
            Self::HealthPack => Some(ItemKind::HealthPack),
            _ => None,
        }
    }

    /// Enemy kind occupying the cell, if any.
    #[must_use]
    pub const fn enemy_kind(self) -> Option<EnemyKind> {
        match self {
            Self::Crocodile => Some(EnemyKind::Crocodile),
            Self::Snake => Some(EnemyKind::Snake),
            Self::Boss => Some(EnemyKind::Boss),
            _ => None,
        }
    }
}

/// Named, stackable inventory items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    /// Ammunition consumed by firing.
    Bullets,
    /// Consumed to clear thorns.
    Axe,
    /// Kept as a trophy after healing on pickup.
    Food,
    /// Consumed to restore health.
    HealthPack,
}

impl ItemKind {
    /// Display name of the item.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bullets => "Bullets",
            Self::Axe => "Axe",
            Self::Food => "Food",
            Self::HealthPack => "Health Pack",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stack of a single item kind held by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Kind of item stacked.
    pub item: ItemKind,
    /// Number of units held; always at least one.
    pub quantity: u32,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Closed set of enemy kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Patrols a short loop and bites adjacent players.
    Crocodile,
    /// Stationary sniper firing at a fixed cadence.
    Snake,
    /// Multi-phase arena boss.
    Boss,
}

/// Actor that fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shooter {
    /// The player's weapon.
    Player,
    /// A snake identified by its enemy id.
    Snake(EnemyId),
    /// The boss's ranged volley.
    Boss,
}

/// What stopped a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RayHit {
    /// The projectile left the grid.
    Edge,
    /// The projectile struck the player.
    Player {
        /// Cell the player occupies.
        cell: CellCoord,
    },
    /// The projectile struck the first non-open cell.
    Obstacle {
        /// Cell that absorbed the projectile.
        cell: CellCoord,
        /// Terrain of that cell.
        terrain: Terrain,
    },
}

/// Origin of a health loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageSource {
    /// Walking into thorns.
    Thorns,
    /// Walking into an enemy.
    Encounter {
        /// Kind of enemy bumped into.
        kind: EnemyKind,
    },
    /// A crocodile stepping next to the player.
    CrocodileBite,
    /// A snake's shot.
    SnakeShot,
    /// The boss's melee strike.
    BossStrike,
    /// The boss's ranged volley.
    BossVolley,
}

/// Reasons a player action fails without ending the turn early.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionFailure {
    /// Firing requires ammunition.
    NoAmmunition,
    /// Breaking thorns requires an axe.
    NoAxe,
    /// No thorns lie in the requested direction.
    NoThornsThere,
    /// Healing requires a health pack.
    NoHealthPack,
    /// The checkpoint history is empty.
    NoCheckpoint,
}

/// Attack phase of the boss, derived from its remaining health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    /// Close-range strikes.
    First,
    /// Ranged volleys.
    Second,
    /// Desperate mix of heavier strikes and volleys.
    Third,
}

impl BossPhase {
    /// One-based phase number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

/// Attack pattern executed by the boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BossAttack {
    /// Melee blow landing when the player is within `reach` cells on both axes.
    Strike {
        /// Exclusive per-axis distance limit.
        reach: u32,
        /// Health removed on contact.
        damage: i32,
    },
    /// Ranged shot aimed straight at the player.
    Volley {
        /// Health removed on impact.
        damage: i32,
    },
}

/// Map layout choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSize {
    /// Compact fifteen-column map.
    #[default]
    Small,
    /// Twenty-column map.
    Large,
}

/// Enemy population choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyCount {
    /// One snake and two crocodiles.
    #[default]
    Few,
    /// Two snakes and four crocodiles.
    Many,
}

/// Enemy strength choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyPower {
    /// Two-hit enemies with light damage.
    #[default]
    Weak,
    /// Three-hit enemies with heavier damage.
    Strong,
}

/// Difficulty configuration supplied by the configuration collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Difficulty {
    /// Map layout to explore.
    pub map: MapSize,
    /// Size of the enemy pools.
    pub enemy_count: EnemyCount,
    /// Health and damage of the enemies.
    pub enemy_power: EnemyPower,
}

impl Difficulty {
    /// Creates a difficulty from its three choices.
    #[must_use]
    pub const fn new(map: MapSize, enemy_count: EnemyCount, enemy_power: EnemyPower) -> Self {
        Self {
            map,
            enemy_count,
            enemy_power,
        }
    }

    /// Derives enemy counts, health and damage from the choices.
    #[must_use]
    pub const fn profile(&self) -> DifficultyProfile {
        let (snake_count, crocodile_count) = match self.enemy_count {
            EnemyCount::Few => (1, 2),
            EnemyCount::Many => (2, 4),
        };
        let (health, snake_damage, crocodile_damage) = match self.enemy_power {
            EnemyPower::Weak => (2, 15, 10),
            EnemyPower::Strong => (3, 20, 15),
        };
        DifficultyProfile {
            snake_count,
            crocodile_count,
            snake_health: health,
            crocodile_health: health,
            snake_damage,
            crocodile_damage,
        }
    }
}

/// Enemy parameters derived from a [`Difficulty`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Number of snakes spawned.
    pub snake_count: usize,
    /// Number of crocodiles spawned.
    pub crocodile_count: usize,
    /// Hits a snake absorbs.
    pub snake_health: u32,
    /// Hits a crocodile absorbs.
    pub crocodile_health: u32,
    /// Damage dealt by a snake's shot.
    pub snake_damage: i32,
    /// Damage dealt by a crocodile's bite.
    pub crocodile_damage: i32,
}

/// Gameplay constants applied by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Health the player starts each map with.
    pub starting_health: i32,
    /// Health granted after respawning at a checkpoint.
    pub respawn_health: i32,
    /// Damage taken when walking into thorns.
    pub thorn_penalty: i32,
    /// Damage taken when walking into an enemy.
    pub encounter_damage: i32,
    /// Health restored by picking up food.
    pub food_heal: i32,
    /// Health restored by using a health pack.
    pub health_pack_heal: i32,
    /// Rounds of ammunition granted by a weapon pickup.
    pub rounds_per_weapon_pickup: u32,
    /// Score for killing a crocodile.
    pub crocodile_bounty: u32,
    /// Score for killing a snake.
    pub snake_bounty: u32,
    /// Score for defeating the boss.
    pub boss_bounty: u32,
    /// Health the boss starts with.
    pub boss_health: u32,
    /// Boss health removed by one of the player's rounds.
    pub player_shot_damage: u32,
    /// Number of enemy phases between two snake shots.
    pub snake_shot_interval: u32,
    /// Chebyshev radius within which enemies trigger the danger warning.
    pub danger_radius: u32,
}

impl Rules {
    /// Score awarded for defeating an enemy of the given kind.
    #[must_use]
    pub const fn bounty(&self, kind: EnemyKind) -> u32 {
        match kind {
            EnemyKind::Crocodile => self.crocodile_bounty,
            EnemyKind::Snake => self.snake_bounty,
            EnemyKind::Boss => self.boss_bounty,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_health: 100,
            respawn_health: 50,
            thorn_penalty: 10,
            encounter_damage: 20,
            food_heal: 20,
            health_pack_heal: 50,
            rounds_per_weapon_pickup: 30,
            crocodile_bounty: 100,
            snake_bounty: 75,
            boss_bounty: 500,
            boss_health: 100,
            player_shot_damage: 10,
            snake_shot_interval: 4,
            danger_radius: 5,
        }
    }
}

/// Immutable representation of a single cell for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSnapshot {
    /// Coordinate of the cell.
    pub cell: CellCoord,
    /// Current terrain kind.
    pub terrain: Terrain,
    /// Whether the player stands here.
    pub is_player: bool,
}

/// Immutable representation of the player's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Cell the player occupies.
    pub cell: CellCoord,
    /// Current health.
    pub health: i32,
    /// Current score.
    pub score: u32,
    /// Most significant event of the last turn.
    pub status: String,
    /// Inventory in display order.
    pub inventory: Vec<InventoryEntry>,
    /// Number of checkpoints available for recovery.
    pub checkpoints: usize,
    /// Whether a weapon was ever picked up.
    pub has_weapon: bool,
    /// Whether the player chose to enter the boss arena.
    pub ready_for_boss: bool,
}

/// Immutable representation of the boss's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossSnapshot {
    /// Cell the boss occupies.
    pub cell: CellCoord,
    /// Remaining health.
    pub health: u32,
    /// Phase of the most recent attack.
    pub phase: BossPhase,
    /// Whether the attack gate is open this enemy phase.
    pub attack_ready: bool,
    /// Whether the movement gate is open this enemy phase.
    pub move_ready: bool,
}

/// Read-only snapshot of the world handed to the rendering collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSnapshot {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Cells in row-major order.
    pub cells: Vec<CellSnapshot>,
    /// Player state.
    pub player: PlayerSnapshot,
    /// Boss state while the arena is active.
    pub boss: Option<BossSnapshot>,
}

impl WorldSnapshot {
    /// Returns the snapshot of the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&CellSnapshot> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        self.cells.get(row * width + column)
    }

    /// Iterator over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[CellSnapshot]> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.cells.chunks(width)
    }
}

/// Immutable representation of a single crocodile used by its controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrocodileSnapshot {
    /// Unique identifier assigned to the crocodile.
    pub id: EnemyId,
    /// Cell currently occupied.
    pub cell: CellCoord,
    /// Hits remaining.
    pub health: u32,
    /// Front of the patrol loop, if the loop is not empty.
    pub next_waypoint: Option<CellCoord>,
}

/// Read-only snapshot describing all living crocodiles.
#[derive(Clone, Debug, Default)]
pub struct CrocodileView {
    snapshots: Vec<CrocodileSnapshot>,
}

impl CrocodileView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<CrocodileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &CrocodileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<CrocodileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single snake used by its controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnakeSnapshot {
    /// Unique identifier assigned to the snake.
    pub id: EnemyId,
    /// Cell currently occupied.
    pub cell: CellCoord,
    /// Hits remaining.
    pub health: u32,
    /// Enemy phases accumulated since the last shot.
    pub charge: u32,
    /// Whether the charge reached the firing cadence.
    pub ready: bool,
}

/// Read-only snapshot describing all living snakes.
#[derive(Clone, Debug, Default)]
pub struct SnakeView {
    snapshots: Vec<SnakeSnapshot>,
}

impl SnakeView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<SnakeSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &SnakeSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<SnakeSnapshot> {
        self.snapshots
    }
}

/// Errors raised while turning a layout into a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout contained no cells.
    #[error("layout contains no cells")]
    Empty,
    /// Random layouts need at least one column and one row.
    #[error("layout dimensions must be positive (received {columns}x{rows})")]
    EmptyDimensions {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// Random layouts may not exceed the supported cell count.
    #[error("layout of {columns}x{rows} cells is too large")]
    TooLarge {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// No player marker was found.
    #[error("layout has no player start marker")]
    MissingPlayerStart,
    /// More than one player marker was found.
    #[error("layout has a second player start at {second:?} (first at {first:?})")]
    DuplicatePlayerStart {
        /// First marker encountered.
        first: CellCoord,
        /// Offending second marker.
        second: CellCoord,
    },
}

/// Invariant violations that abort session initialisation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A layout could not be turned into a grid.
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    /// The boss arena layout does not place a boss.
    #[error("boss position not found in the arena layout")]
    BossMissing,
}
