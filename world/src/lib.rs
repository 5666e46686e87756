#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Bayou.

mod checkpoints;
mod enemies;
mod grid;
mod inventory;
mod layout;
pub mod maps;
mod player;
mod raycast;

pub use layout::LayoutSource;

use bayou_core::{
    ActionFailure, BossAttack, BossPhase, CellCoord, Command, DamageSource, Difficulty,
    DifficultyProfile, Direction, EnemyId, EnemyKind, Event, Heading, ItemKind, RayHit, Rules,
    SessionError, Shooter, Terrain, WELCOME_BANNER,
};
use log::{debug, info, warn};

use crate::{
    enemies::{Boss, Crocodile, Snake},
    grid::Grid,
    layout::Layout,
    player::Player,
};

const DANGER_MESSAGE: &str = "Danger detected nearby!";

/// Settings from which a world is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Source of the explored map.
    pub layout: LayoutSource,
    /// Candidate crocodile spawn cells in activation order.
    pub crocodile_spawns: Vec<CellCoord>,
    /// Candidate snake spawn cells in activation order.
    pub snake_spawns: Vec<CellCoord>,
    /// Enemy counts, health and damage.
    pub profile: DifficultyProfile,
    /// Gameplay constants.
    pub rules: Rules,
}

impl WorldConfig {
    /// Creates a configuration without enemy spawn points.
    #[must_use]
    pub fn new(layout: LayoutSource, profile: DifficultyProfile, rules: Rules) -> Self {
        Self {
            layout,
            crocodile_spawns: Vec::new(),
            snake_spawns: Vec::new(),
            profile,
            rules,
        }
    }

    /// Derives the bundled map and spawn points from a difficulty selection.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty, rules: Rules) -> Self {
        let blueprint = maps::blueprint(difficulty.map);
        Self::new(
            LayoutSource::text(blueprint.layout),
            difficulty.profile(),
            rules,
        )
        .with_crocodile_spawns(blueprint.crocodile_spawns.to_vec())
        .with_snake_spawns(blueprint.snake_spawns.to_vec())
    }

    /// Replaces the crocodile spawn cells.
    #[must_use]
    pub fn with_crocodile_spawns(mut self, spawns: Vec<CellCoord>) -> Self {
        self.crocodile_spawns = spawns;
        self
    }

    /// Replaces the snake spawn cells.
    #[must_use]
    pub fn with_snake_spawns(mut self, spawns: Vec<CellCoord>) -> Self {
        self.snake_spawns = spawns;
        self
    }
}

/// Represents the authoritative Bayou world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    player: Player,
    crocodiles: Vec<Crocodile>,
    snakes: Vec<Snake>,
    boss: Option<Boss>,
    profile: DifficultyProfile,
    rules: Rules,
    turn: u64,
    next_enemy_id: u32,
}

impl World {
    /// Builds the grid, places the player and spawns the enemy pools.
    ///
    /// Spawn cells that are not open ground are skipped rather than replaced.
    /// A layout that already contains a boss starts with the boss active.
    pub fn new(config: WorldConfig) -> Result<Self, SessionError> {
        let Layout { grid, start } = config.layout.build()?;
        let mut world = Self {
            banner: WELCOME_BANNER,
            grid,
            player: Player::new(start, config.rules.starting_health),
            crocodiles: Vec::new(),
            snakes: Vec::new(),
            boss: None,
            profile: config.profile,
            rules: config.rules,
            turn: 0,
            next_enemy_id: 0,
        };

        world.spawn_crocodiles(&config.crocodile_spawns);
        world.spawn_snakes(&config.snake_spawns);
        if let Some(cell) = locate_boss(&world.grid) {
            let id = world.allocate_enemy_id();
            world.boss = Some(Boss::new(id, cell, world.rules.boss_health));
        }

        debug!(
            "world ready: {}x{} grid, {} crocodiles, {} snakes",
            world.grid.columns(),
            world.grid.rows(),
            world.crocodiles.len(),
            world.snakes.len()
        );
        Ok(world)
    }

    fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.saturating_add(1);
        id
    }

    fn can_spawn_at(&self, cell: CellCoord) -> bool {
        cell != self.player.cell && self.grid.terrain(cell) == Some(Terrain::OpenGround)
    }

    fn spawn_crocodiles(&mut self, spawns: &[CellCoord]) {
        let health = self.profile.crocodile_health;
        for &cell in spawns.iter().take(self.profile.crocodile_count) {
            if !self.can_spawn_at(cell) {
                debug!("crocodile spawn {cell:?} is not open ground; skipped");
                continue;
            }
            let route = self.patrol_route(cell);
            let id = self.allocate_enemy_id();
            self.grid.occupy(cell, Terrain::Crocodile, health);
            self.crocodiles.push(Crocodile::new(id, cell, route));
        }
    }

    /// Loop of the spawn cell, its right neighbour, the cell below that and the cell below the spawn.
    fn patrol_route(&self, spawn: CellCoord) -> Vec<CellCoord> {
        let right = self.grid.neighbor(spawn, Direction::East);
        let right_down = right.and_then(|cell| self.grid.neighbor(cell, Direction::South));
        let down = self.grid.neighbor(spawn, Direction::South);
        [Some(spawn), right, right_down, down]
            .into_iter()
            .flatten()
            .collect()
    }

    fn spawn_snakes(&mut self, spawns: &[CellCoord]) {
        let health = self.profile.snake_health;
        for &cell in spawns.iter().take(self.profile.snake_count) {
            if !self.can_spawn_at(cell) {
                debug!("snake spawn {cell:?} is not open ground; skipped");
                continue;
            }
            let id = self.allocate_enemy_id();
            self.grid.occupy(cell, Terrain::Snake, health);
            self.snakes.push(Snake::new(id, cell));
        }
    }

    fn active_boss_mut(&mut self) -> Option<&mut Boss> {
        self.boss.as_mut().filter(|boss| !boss.is_defeated())
    }

    fn damage_player(&mut self, amount: i32, source: DamageSource, out_events: &mut Vec<Event>) {
        self.player.health = self.player.health.saturating_sub(amount);
        out_events.push(Event::PlayerDamaged {
            amount,
            source,
            health: self.player.health,
        });
    }

    fn heal_player(&mut self, amount: i32, out_events: &mut Vec<Event>) {
        self.player.health = self.player.health.saturating_add(amount);
        out_events.push(Event::PlayerHealed {
            amount,
            health: self.player.health,
        });
    }

    fn fail(&mut self, failure: ActionFailure, message: &str, out_events: &mut Vec<Event>) {
        debug!("player action failed: {failure:?}");
        self.player.status.set(message);
        out_events.push(Event::ActionFailed { failure });
    }

    fn begin_enemy_phase(&mut self) {
        for snake in &mut self.snakes {
            snake.charge = snake.charge.saturating_add(1);
        }
        if let Some(boss) = self.active_boss_mut() {
            boss.attack.tick();
            boss.movement.tick();
        }
    }

    fn advance_crocodile(
        &mut self,
        crocodile: EnemyId,
        target: Option<CellCoord>,
        out_events: &mut Vec<Event>,
    ) {
        let Some(index) = self
            .crocodiles
            .iter()
            .position(|candidate| candidate.id == crocodile)
        else {
            warn!("ignoring command for unknown crocodile {crocodile:?}");
            return;
        };

        let waypoint = self.crocodiles[index].rotate_route();
        let Some(to) = target else {
            return;
        };
        if waypoint != Some(to) {
            warn!("crocodile {crocodile:?} proposed {to:?} but its route expected {waypoint:?}");
            return;
        }

        let player_cell = self.player.cell;
        if to == player_cell || self.grid.terrain(to) != Some(Terrain::OpenGround) {
            return;
        }

        let from = self.crocodiles[index].cell;
        self.grid.relocate_occupant(from, to);
        self.crocodiles[index].cell = to;
        out_events.push(Event::CrocodileMoved {
            crocodile,
            from,
            to,
        });

        if to.chebyshev_distance(player_cell) <= 1 {
            let damage = self.profile.crocodile_damage;
            self.damage_player(damage, DamageSource::CrocodileBite, out_events);
            self.player
                .status
                .set(format!("A crocodile bit you! -{damage} health"));
        }
    }

    fn fire_snake(&mut self, snake: EnemyId, direction: Direction, out_events: &mut Vec<Event>) {
        let interval = self.rules.snake_shot_interval;
        let Some(shooter) = self.snakes.iter_mut().find(|candidate| candidate.id == snake) else {
            warn!("ignoring shot from unknown snake {snake:?}");
            return;
        };
        if shooter.charge < interval {
            warn!("snake {snake:?} fired before it finished charging");
            return;
        }
        shooter.charge = 0;
        let origin = shooter.cell;

        let trace = raycast::trace(
            &self.grid,
            origin,
            Heading::from(direction),
            Some(self.player.cell),
        );
        let hit = trace.hit;
        out_events.push(Event::ProjectileTraced {
            shooter: Shooter::Snake(snake),
            path: trace.path,
            hit,
        });

        if let RayHit::Player { .. } = hit {
            let damage = self.profile.snake_damage;
            self.damage_player(damage, DamageSource::SnakeShot, out_events);
            self.player
                .status
                .set(format!("A snake shot you! -{damage} health"));
        }
    }

    fn boss_attack(
        &mut self,
        phase: BossPhase,
        attack: BossAttack,
        cooldown: u32,
        out_events: &mut Vec<Event>,
    ) {
        let player_cell = self.player.cell;
        let Some(boss) = self.active_boss_mut() else {
            warn!("ignoring boss attack without an active boss");
            return;
        };
        if !boss.attack.is_ready() {
            warn!("boss attacked while its attack gate was closed");
            return;
        }
        boss.attack.reset(cooldown);
        let phase_changed = boss.phase != phase;
        boss.phase = phase;
        let boss_cell = boss.cell;

        if phase_changed {
            info!("boss entered phase {}", phase.number());
            out_events.push(Event::BossPhaseChanged { phase });
        }

        match attack {
            BossAttack::Strike { reach, damage } => {
                let within = boss_cell.column().abs_diff(player_cell.column()) < reach
                    && boss_cell.row().abs_diff(player_cell.row()) < reach;
                if within {
                    self.damage_player(damage, DamageSource::BossStrike, out_events);
                    self.player
                        .status
                        .set(format!("The boss strikes you! -{damage} health"));
                }
            }
            BossAttack::Volley { damage } => {
                let Some(heading) = Heading::toward(boss_cell, player_cell) else {
                    return;
                };
                let trace = raycast::trace(&self.grid, boss_cell, heading, Some(player_cell));
                let hit = trace.hit;
                out_events.push(Event::ProjectileTraced {
                    shooter: Shooter::Boss,
                    path: trace.path,
                    hit,
                });
                if let RayHit::Player { .. } = hit {
                    self.damage_player(damage, DamageSource::BossVolley, out_events);
                    self.player
                        .status
                        .set(format!("The boss hit you from afar! -{damage} health"));
                }
            }
        }
    }

    fn step_boss(&mut self, heading: Heading, cooldown: u32, out_events: &mut Vec<Event>) {
        let player_cell = self.player.cell;
        let Some(boss) = self.boss.as_mut().filter(|boss| !boss.is_defeated()) else {
            warn!("ignoring boss step without an active boss");
            return;
        };
        if !boss.movement.is_ready() {
            warn!("boss moved while its movement gate was closed");
            return;
        }
        boss.movement.reset(cooldown);

        let from = boss.cell;
        let Some(to) = self.grid.step(from, heading) else {
            return;
        };
        if to == player_cell || self.grid.terrain(to) != Some(Terrain::OpenGround) {
            return;
        }
        boss.cell = to;
        self.grid.relocate_occupant(from, to);
        out_events.push(Event::BossMoved { from, to });
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.player.cell;
        let Some(to) = self.grid.neighbor(from, direction) else {
            debug!("player move {direction:?} stopped at the grid edge");
            return;
        };
        let Some(terrain) = self.grid.terrain(to) else {
            return;
        };

        match terrain {
            Terrain::Wall => {
                out_events.push(Event::PlayerBlocked { cell: to, terrain });
                self.player.status.set("A wall blocks the way.");
            }
            Terrain::Thorns => {
                out_events.push(Event::PlayerBlocked { cell: to, terrain });
                let penalty = self.rules.thorn_penalty;
                self.damage_player(penalty, DamageSource::Thorns, out_events);
                self.player
                    .status
                    .set(format!("Ouch! The thorns cut you. -{penalty} health"));
            }
            _ => match terrain.enemy_kind() {
                Some(kind) => {
                    out_events.push(Event::PlayerBlocked { cell: to, terrain });
                    let damage = self.rules.encounter_damage;
                    self.damage_player(damage, DamageSource::Encounter { kind }, out_events);
                    self.player.status.set(format!(
                        "You ran into a {}! -{damage} health",
                        enemy_name(kind).to_lowercase()
                    ));
                }
                None => {
                    self.player.cell = to;
                    out_events.push(Event::PlayerMoved { from, to });
                    self.enter_cell(to, terrain, out_events);
                }
            },
        }
    }

    fn enter_cell(&mut self, cell: CellCoord, terrain: Terrain, out_events: &mut Vec<Event>) {
        if let Some(item) = terrain.pickup() {
            let quantity = match item {
                ItemKind::Bullets => self.rules.rounds_per_weapon_pickup,
                _ => 1,
            };
            self.player.inventory.add(item, quantity);
            out_events.push(Event::ItemCollected { item, quantity });
        }

        match terrain {
            Terrain::WeaponPickup => {
                self.player.has_weapon = true;
                self.player.status.set(format!(
                    "You picked up a gun! +{} bullets",
                    self.rules.rounds_per_weapon_pickup
                ));
            }
            Terrain::Axe => self.player.status.set("You found an axe."),
            Terrain::HealthPack => self.player.status.set("You found a health pack."),
            Terrain::Food => {
                let heal = self.rules.food_heal;
                self.heal_player(heal, out_events);
                self.player
                    .status
                    .set(format!("You ate some food. +{heal} health"));
            }
            Terrain::Checkpoint => self.record_checkpoint(cell, out_events),
            Terrain::Portal => {
                out_events.push(Event::PortalReached { cell });
                self.player.status.set("You found the portal!");
            }
            _ => {}
        }

        if terrain.is_consumed_on_entry() {
            self.grid.set_terrain(cell, Terrain::OpenGround);
        }
    }

    fn record_checkpoint(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let evicted = self.player.checkpoints.record(cell);
        out_events.push(Event::CheckpointRecorded { cell, evicted });
        self.player.status.set("Checkpoint saved.");
    }

    fn fire_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if !self.player.inventory.consume(ItemKind::Bullets) {
            self.fail(ActionFailure::NoAmmunition, "No bullets left!", out_events);
            return;
        }
        out_events.push(Event::ItemConsumed {
            item: ItemKind::Bullets,
        });

        let trace = raycast::trace(&self.grid, self.player.cell, Heading::from(direction), None);
        let hit = trace.hit;
        out_events.push(Event::ProjectileTraced {
            shooter: Shooter::Player,
            path: trace.path,
            hit,
        });

        match hit {
            RayHit::Obstacle { cell, terrain } => match terrain.enemy_kind() {
                Some(EnemyKind::Boss) => self.hit_boss(cell, out_events),
                Some(kind) => self.hit_enemy(kind, cell, out_events),
                None => self.player.status.set("The bullet hit an obstacle."),
            },
            RayHit::Edge => self.player.status.set("The bullet flew off into the distance."),
            RayHit::Player { .. } => {}
        }
    }

    fn hit_enemy(&mut self, kind: EnemyKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        let enemy = match kind {
            EnemyKind::Crocodile => self
                .crocodiles
                .iter()
                .find(|crocodile| crocodile.cell == cell)
                .map(|crocodile| crocodile.id),
            EnemyKind::Snake => self
                .snakes
                .iter()
                .find(|snake| snake.cell == cell)
                .map(|snake| snake.id),
            EnemyKind::Boss => None,
        };
        let Some(enemy) = enemy else {
            warn!("no {kind:?} registered at {cell:?}");
            return;
        };

        let remaining = self.grid.health(cell).saturating_sub(1);
        let name = enemy_name(kind);
        if remaining > 0 {
            self.grid.set_health(cell, remaining);
            out_events.push(Event::EnemyHit {
                enemy,
                kind,
                cell,
                remaining,
            });
            self.player
                .status
                .set(format!("{name} hit! {remaining} more"));
            return;
        }

        self.grid.set_terrain(cell, Terrain::OpenGround);
        self.crocodiles.retain(|crocodile| crocodile.id != enemy);
        self.snakes.retain(|snake| snake.id != enemy);
        let bounty = self.rules.bounty(kind);
        self.player.score = self.player.score.saturating_add(bounty);
        out_events.push(Event::EnemyDefeated {
            enemy,
            kind,
            cell,
            bounty,
        });
        self.player
            .status
            .set(format!("{name} killed! +{bounty} points"));
    }

    fn hit_boss(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let damage = self.rules.player_shot_damage;
        let Some(boss) = self.active_boss_mut().filter(|boss| boss.cell == cell) else {
            warn!("no active boss at {cell:?}");
            return;
        };
        boss.health = boss.health.saturating_sub(damage);
        let (enemy, health) = (boss.id, boss.health);

        if health > 0 {
            out_events.push(Event::EnemyHit {
                enemy,
                kind: EnemyKind::Boss,
                cell,
                remaining: health,
            });
            self.player
                .status
                .set(format!("Boss hit! {health} health left"));
            return;
        }

        self.grid.set_terrain(cell, Terrain::OpenGround);
        let bounty = self.rules.boss_bounty;
        self.player.score = self.player.score.saturating_add(bounty);
        info!("boss defeated");
        out_events.push(Event::EnemyDefeated {
            enemy,
            kind: EnemyKind::Boss,
            cell,
            bounty,
        });
        self.player
            .status
            .set(format!("The boss is defeated! +{bounty} points"));
    }

    fn break_obstacle(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let target = self
            .grid
            .neighbor(self.player.cell, direction)
            .filter(|cell| self.grid.terrain(*cell) == Some(Terrain::Thorns));
        let Some(target) = target else {
            self.fail(
                ActionFailure::NoThornsThere,
                "There are no thorns there.",
                out_events,
            );
            return;
        };
        if !self.player.inventory.consume(ItemKind::Axe) {
            self.fail(
                ActionFailure::NoAxe,
                "You need an axe to clear thorns.",
                out_events,
            );
            return;
        }

        self.grid.set_terrain(target, Terrain::OpenGround);
        out_events.push(Event::ItemConsumed { item: ItemKind::Axe });
        out_events.push(Event::ThornsCleared { cell: target });
        self.player.status.set("You cleared the thorns.");
    }

    fn use_health_pack(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.inventory.consume(ItemKind::HealthPack) {
            self.fail(
                ActionFailure::NoHealthPack,
                "You have no health pack.",
                out_events,
            );
            return;
        }
        out_events.push(Event::ItemConsumed {
            item: ItemKind::HealthPack,
        });
        let heal = self.rules.health_pack_heal;
        self.heal_player(heal, out_events);
        self.player
            .status
            .set(format!("You used a health pack. +{heal} health"));
    }

    fn show_inventory(&mut self, out_events: &mut Vec<Event>) {
        let entries = self.player.inventory.entries().to_vec();
        if entries.is_empty() {
            self.player.status.set("Your inventory is empty.");
        } else {
            let listing: Vec<String> = entries
                .iter()
                .map(|entry| format!("{} x{}", entry.item, entry.quantity))
                .collect();
            self.player
                .status
                .set(format!("Inventory: {}", listing.join(", ")));
        }
        out_events.push(Event::InventoryShown { entries });
    }

    fn recover_checkpoint(&mut self, out_events: &mut Vec<Event>) {
        let Some(cell) = self.recover_free_checkpoint() else {
            self.fail(
                ActionFailure::NoCheckpoint,
                "No checkpoint to return to.",
                out_events,
            );
            return;
        };
        self.player.cell = cell;
        out_events.push(Event::CheckpointRestored { cell });
        self.player.status.set("Back at the last checkpoint.");
    }

    /// Pops checkpoints until one is not occupied by an enemy.
    fn recover_free_checkpoint(&mut self) -> Option<CellCoord> {
        let grid = &self.grid;
        self.player.checkpoints.recover(|cell| {
            let occupied = grid.terrain(cell).map_or(true, Terrain::is_enemy);
            if occupied {
                debug!("discarding checkpoint {cell:?} occupied by an enemy");
            }
            !occupied
        })
    }

    fn resolve_death(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.is_dead() {
            return;
        }
        match self.recover_free_checkpoint() {
            Some(cell) => {
                let health = self.rules.respawn_health;
                self.player.cell = cell;
                self.player.health = health;
                info!("player respawned at {cell:?}");
                out_events.push(Event::CheckpointRestored { cell });
                out_events.push(Event::PlayerRespawned { cell, health });
                self.player
                    .status
                    .set("You died! Respawned at the last checkpoint.");
            }
            None => {
                info!("player died with no checkpoints left");
                out_events.push(Event::CheckpointsExhausted);
                self.player.status.set("You died. Game over.");
            }
        }
    }
}

fn locate_boss(grid: &Grid) -> Option<CellCoord> {
    grid.iter()
        .find(|(_, terrain)| *terrain == Terrain::Boss)
        .map(|(cell, _)| cell)
}

fn enemy_name(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Crocodile => "Crocodile",
        EnemyKind::Snake => "Snake",
        EnemyKind::Boss => "Boss",
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginTurn => {
            world.turn = world.turn.saturating_add(1);
            world.player.status.begin_turn();
            out_events.push(Event::TurnStarted { turn: world.turn });
        }
        Command::BeginEnemyPhase => world.begin_enemy_phase(),
        Command::StepCrocodile { crocodile, to } => {
            world.advance_crocodile(crocodile, Some(to), out_events);
        }
        Command::HoldCrocodile { crocodile } => {
            world.advance_crocodile(crocodile, None, out_events);
        }
        Command::FireSnake { snake, direction } => world.fire_snake(snake, direction, out_events),
        Command::BossAttack {
            phase,
            attack,
            cooldown,
        } => world.boss_attack(phase, attack, cooldown, out_events),
        Command::StepBoss { heading, cooldown } => world.step_boss(heading, cooldown, out_events),
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::FirePlayer { direction } => world.fire_player(direction, out_events),
        Command::BreakObstacle { direction } => world.break_obstacle(direction, out_events),
        Command::UseHealthPack => world.use_health_pack(out_events),
        Command::ShowInventory => world.show_inventory(out_events),
        Command::RecoverCheckpoint => world.recover_checkpoint(out_events),
        Command::WarnOfDanger { nearest } => {
            if world.player.status.set_if_quiet(DANGER_MESSAGE) {
                out_events.push(Event::DangerSensed { nearest });
            }
        }
        Command::ResolveDeath => world.resolve_death(out_events),
    }
}

/// Replaces the explored grid with the boss arena.
///
/// The player keeps score and inventory, regains starting health and loses
/// the checkpoint history because none of its cells exist in the new grid.
/// Crocodile and snake pools are discarded. The world is left untouched when
/// the arena cannot be built or holds no boss.
pub fn enter_arena(
    world: &mut World,
    arena: &LayoutSource,
    out_events: &mut Vec<Event>,
) -> Result<(), SessionError> {
    let Layout { grid, start } = arena.build()?;
    let boss_cell = locate_boss(&grid).ok_or(SessionError::BossMissing)?;

    world.player.cell = start;
    world.player.checkpoints.clear();
    world.player.health = world.rules.starting_health;
    world.player.ready_for_boss = true;
    world.crocodiles.clear();
    world.snakes.clear();
    let id = world.allocate_enemy_id();
    world.boss = Some(Boss::new(id, boss_cell, world.rules.boss_health));
    world.grid = grid;

    info!("entered the boss arena; boss waits at {boss_cell:?}");
    out_events.push(Event::ArenaEntered {
        start,
        boss: boss_cell,
    });
    world.player.status.set("The boss awaits!");
    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use bayou_core::{
        BossSnapshot, CellCoord, CellSnapshot, CrocodileSnapshot, CrocodileView,
        DifficultyProfile, InventoryEntry, PlayerSnapshot, Rules, SnakeSnapshot, SnakeView,
        Terrain, WorldSnapshot,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Number of turns started so far.
    #[must_use]
    pub fn turn(world: &World) -> u64 {
        world.turn
    }

    /// Column and row count of the active grid.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.grid.columns(), world.grid.rows())
    }

    /// Terrain stored in a cell of the active grid.
    #[must_use]
    pub fn terrain(world: &World, cell: CellCoord) -> Option<Terrain> {
        world.grid.terrain(cell)
    }

    /// Cell the player currently occupies.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.player.cell
    }

    /// Current player health.
    #[must_use]
    pub fn player_health(world: &World) -> i32 {
        world.player.health
    }

    /// Current player score.
    #[must_use]
    pub fn player_score(world: &World) -> u32 {
        world.player.score
    }

    /// Reports whether the player's health is exhausted.
    #[must_use]
    pub fn is_player_dead(world: &World) -> bool {
        world.player.is_dead()
    }

    /// Status message describing the turn's most recent event.
    #[must_use]
    pub fn status(world: &World) -> &str {
        world.player.status.as_str()
    }

    /// Inventory entries in display order.
    #[must_use]
    pub fn inventory(world: &World) -> &[InventoryEntry] {
        world.player.inventory.entries()
    }

    /// Number of checkpoints available for recovery.
    #[must_use]
    pub fn checkpoint_count(world: &World) -> usize {
        world.player.checkpoints.len()
    }

    /// Reports whether the player stands on the portal.
    #[must_use]
    pub fn is_on_portal(world: &World) -> bool {
        world.grid.terrain(world.player.cell) == Some(Terrain::Portal)
    }

    /// Reports whether a boss that still has health is present.
    #[must_use]
    pub fn is_boss_active(world: &World) -> bool {
        world.boss.as_ref().is_some_and(|boss| !boss.is_defeated())
    }

    /// Reports whether the boss ran out of health.
    #[must_use]
    pub fn is_boss_defeated(world: &World) -> bool {
        world.boss.as_ref().is_some_and(|boss| boss.is_defeated())
    }

    /// Captures the boss state, if a boss exists.
    #[must_use]
    pub fn boss(world: &World) -> Option<BossSnapshot> {
        world.boss.as_ref().map(|boss| BossSnapshot {
            cell: boss.cell,
            health: boss.health,
            phase: boss.phase,
            attack_ready: boss.attack.is_ready(),
            move_ready: boss.movement.is_ready(),
        })
    }

    /// Enemy parameters the world was built with.
    #[must_use]
    pub fn profile(world: &World) -> DifficultyProfile {
        world.profile
    }

    /// Gameplay constants the world applies.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Captures a read-only view of the living crocodiles.
    #[must_use]
    pub fn crocodile_view(world: &World) -> CrocodileView {
        let snapshots: Vec<CrocodileSnapshot> = world
            .crocodiles
            .iter()
            .map(|crocodile| CrocodileSnapshot {
                id: crocodile.id,
                cell: crocodile.cell,
                health: world.grid.health(crocodile.cell),
                next_waypoint: crocodile.next_waypoint(),
            })
            .collect();
        CrocodileView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the living snakes.
    #[must_use]
    pub fn snake_view(world: &World) -> SnakeView {
        let interval = world.rules.snake_shot_interval;
        let snapshots: Vec<SnakeSnapshot> = world
            .snakes
            .iter()
            .map(|snake| SnakeSnapshot {
                id: snake.id,
                cell: snake.cell,
                health: world.grid.health(snake.cell),
                charge: snake.charge,
                ready: snake.charge >= interval,
            })
            .collect();
        SnakeView::from_snapshots(snapshots)
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player_snapshot(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: world.player.cell,
            health: world.player.health,
            score: world.player.score,
            status: world.player.status.as_str().to_owned(),
            inventory: world.player.inventory.entries().to_vec(),
            checkpoints: world.player.checkpoints.len(),
            has_weapon: world.player.has_weapon,
            ready_for_boss: world.player.ready_for_boss,
        }
    }

    /// Captures everything the rendering collaborator needs.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        let player_cell = world.player.cell;
        let cells = world
            .grid
            .iter()
            .map(|(cell, terrain)| CellSnapshot {
                cell,
                terrain,
                is_player: cell == player_cell,
            })
            .collect();
        WorldSnapshot {
            columns: world.grid.columns(),
            rows: world.grid.rows(),
            cells,
            player: player_snapshot(world),
            boss: boss(world),
        }
    }
}
