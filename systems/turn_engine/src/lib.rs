#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn engine that resolves one player command plus every enemy update per turn.
//!
//! Each turn runs the enemy phase, the player's action, effect resolution and
//! finally the terminal check. The only point where control returns to the
//! command source before a turn is closed is the portal prompt, which must be
//! answered through [`TurnEngine::choose_portal`] before the next command.

use bayou_core::{
    Command, Difficulty, Event, PlayerCommand, PortalChoice, Rules, SessionError, WorldSnapshot,
};
use bayou_system_boss::BossController;
use bayou_system_crocodile_patrol::CrocodilePatrol;
use bayou_system_danger_sense::DangerSense;
use bayou_system_snake_sniper::SnakeSniper;
use bayou_world::{self as world, maps, query, LayoutSource, World, WorldConfig};
use log::{debug, info};
use thiserror::Error;

/// Everything required to start a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Explored map, enemy pools and rules.
    pub world: WorldConfig,
    /// Layout that replaces the explored map when the player enters the portal.
    pub arena: LayoutSource,
    /// Seed for the boss controller's random choices.
    pub seed: u64,
}

impl SessionConfig {
    /// Creates a session using the bundled boss arena and seed zero.
    #[must_use]
    pub fn new(world: WorldConfig) -> Self {
        Self {
            world,
            arena: LayoutSource::text(maps::BOSS_ARENA),
            seed: 0,
        }
    }

    /// Creates a session on the bundled map selected by `difficulty`.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty, rules: Rules) -> Self {
        Self::new(WorldConfig::for_difficulty(difficulty, rules))
    }

    /// Replaces the boss arena layout.
    #[must_use]
    pub fn with_arena(mut self, arena: LayoutSource) -> Self {
        self.arena = arena;
        self
    }

    /// Replaces the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// How a finished session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionOutcome {
    /// The boss was defeated.
    Victory,
    /// The player died with an empty checkpoint history.
    Defeat,
    /// The player quit between turns.
    Quit,
}

/// Where the session stands between turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Exploring the map.
    Exploring,
    /// Standing on the portal; a [`PortalChoice`] must be supplied.
    AwaitingPortalChoice,
    /// Fighting the boss in the arena.
    BossFight,
    /// The session ended.
    Finished(SessionOutcome),
}

/// Final summary handed to the high-score collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionResult {
    /// How the session ended.
    pub outcome: SessionOutcome,
    /// Score at the end of the session.
    pub score: u32,
    /// Number of turns played.
    pub turns: u64,
}

/// Everything that happened during one resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// Index of the turn.
    pub turn: u64,
    /// Events emitted by the world in the order they occurred.
    pub events: Vec<Event>,
    /// Session state once the turn closed.
    pub state: SessionState,
}

/// Requests the engine rejects without touching the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TurnError {
    /// The session already ended.
    #[error("the session has already finished")]
    SessionFinished,
    /// A portal choice must be made before the next command.
    #[error("a portal choice is pending")]
    PortalChoicePending,
    /// A portal choice was supplied while none was requested.
    #[error("no portal choice is pending")]
    NoPortalChoicePending,
    /// The boss arena could not be loaded.
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnPhase {
    EnemyPhase,
    PlayerAction,
    EffectResolution,
    TerminalCheck,
}

/// Owns the world and every controller for the lifetime of a session.
#[derive(Debug)]
pub struct TurnEngine {
    world: World,
    arena: LayoutSource,
    state: SessionState,
    crocodiles: CrocodilePatrol,
    snakes: SnakeSniper,
    boss: BossController,
    danger: DangerSense,
    commands: Vec<Command>,
}

impl TurnEngine {
    /// Builds the world and prepares the controllers.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let world = World::new(config.world)?;
        let state = if query::is_boss_active(&world) {
            SessionState::BossFight
        } else {
            SessionState::Exploring
        };
        info!("session started in state {state:?} with seed {}", config.seed);

        Ok(Self {
            world,
            arena: config.arena,
            state,
            crocodiles: CrocodilePatrol::new(),
            snakes: SnakeSniper::new(),
            boss: BossController::new(config.seed),
            danger: DangerSense::new(),
            commands: Vec::new(),
        })
    }

    /// Resolves one full turn for the supplied command.
    ///
    /// `Quit` ends the session without running the enemy phase.
    pub fn resolve(&mut self, command: PlayerCommand) -> Result<TurnReport, TurnError> {
        match self.state {
            SessionState::Finished(_) => return Err(TurnError::SessionFinished),
            SessionState::AwaitingPortalChoice => return Err(TurnError::PortalChoicePending),
            SessionState::Exploring | SessionState::BossFight => {}
        }

        let action = match player_action(command) {
            Some(action) => action,
            None => {
                self.finish(SessionOutcome::Quit);
                return Ok(self.report(Vec::new()));
            }
        };

        let mut events = Vec::new();
        self.apply(Command::BeginTurn, &mut events);
        debug!("turn {}: {command:?}", query::turn(&self.world));

        let mut phase = TurnPhase::EnemyPhase;
        loop {
            phase = match phase {
                TurnPhase::EnemyPhase => {
                    self.run_enemy_phase(&mut events);
                    if query::is_player_dead(&self.world) {
                        debug!("player died during the enemy phase; skipping their action");
                        TurnPhase::EffectResolution
                    } else {
                        TurnPhase::PlayerAction
                    }
                }
                TurnPhase::PlayerAction => {
                    self.apply(action.clone(), &mut events);
                    TurnPhase::EffectResolution
                }
                TurnPhase::EffectResolution => {
                    self.sense_danger(&mut events);
                    TurnPhase::TerminalCheck
                }
                TurnPhase::TerminalCheck => {
                    self.terminal_check(&mut events);
                    break;
                }
            };
        }

        Ok(self.report(events))
    }

    /// Answers the portal prompt raised by the previous turn.
    pub fn choose_portal(&mut self, choice: PortalChoice) -> Result<TurnReport, TurnError> {
        if self.state != SessionState::AwaitingPortalChoice {
            return Err(TurnError::NoPortalChoicePending);
        }

        let mut events = Vec::new();
        match choice {
            PortalChoice::EnterArena => {
                world::enter_arena(&mut self.world, &self.arena, &mut events)?;
                self.state = SessionState::BossFight;
                info!("player entered the boss arena");
            }
            PortalChoice::KeepExploring => {
                self.state = SessionState::Exploring;
                debug!("player kept exploring");
            }
        }
        Ok(self.report(events))
    }

    /// Captures the current world for rendering.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        query::snapshot(&self.world)
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Read-only access to the world for additional queries.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Final summary once the session finished.
    #[must_use]
    pub fn result(&self) -> Option<SessionResult> {
        match self.state {
            SessionState::Finished(outcome) => Some(SessionResult {
                outcome,
                score: query::player_score(&self.world),
                turns: query::turn(&self.world),
            }),
            _ => None,
        }
    }

    fn apply(&mut self, command: Command, events: &mut Vec<Event>) {
        world::apply(&mut self.world, command, events);
    }

    fn flush_commands(&mut self, events: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }

    fn run_enemy_phase(&mut self, events: &mut Vec<Event>) {
        self.apply(Command::BeginEnemyPhase, events);
        let player = query::player_cell(&self.world);

        if query::is_boss_active(&self.world) {
            self.boss
                .handle(query::boss(&self.world), player, &mut self.commands);
            self.flush_commands(events);
            return;
        }

        self.snakes.handle(
            &query::snake_view(&self.world),
            player,
            &mut self.commands,
        );
        self.flush_commands(events);

        let world = &self.world;
        self.crocodiles.handle(
            &query::crocodile_view(world),
            player,
            |cell| query::terrain(world, cell),
            &mut self.commands,
        );
        self.flush_commands(events);
    }

    fn sense_danger(&mut self, events: &mut Vec<Event>) {
        if query::is_boss_active(&self.world) || query::is_player_dead(&self.world) {
            return;
        }
        self.danger.handle(
            &query::crocodile_view(&self.world),
            &query::snake_view(&self.world),
            query::player_cell(&self.world),
            query::rules(&self.world).danger_radius,
            &mut self.commands,
        );
        self.flush_commands(events);
    }

    fn terminal_check(&mut self, events: &mut Vec<Event>) {
        if query::is_player_dead(&self.world) {
            self.apply(Command::ResolveDeath, events);
            if query::is_player_dead(&self.world) {
                self.finish(SessionOutcome::Defeat);
                return;
            }
        }

        if query::is_boss_defeated(&self.world) {
            self.finish(SessionOutcome::Victory);
            return;
        }

        if !query::is_boss_active(&self.world) && query::is_on_portal(&self.world) {
            self.state = SessionState::AwaitingPortalChoice;
        }
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        self.state = SessionState::Finished(outcome);
        info!(
            "session finished: {outcome:?} with score {} after {} turns",
            query::player_score(&self.world),
            query::turn(&self.world)
        );
    }

    fn report(&self, events: Vec<Event>) -> TurnReport {
        TurnReport {
            turn: query::turn(&self.world),
            events,
            state: self.state,
        }
    }
}

fn player_action(command: PlayerCommand) -> Option<Command> {
    let action = match command {
        PlayerCommand::Move(direction) => Command::MovePlayer { direction },
        PlayerCommand::Fire(direction) => Command::FirePlayer { direction },
        PlayerCommand::OpenInventory => Command::ShowInventory,
        PlayerCommand::UseHealthPack => Command::UseHealthPack,
        PlayerCommand::BreakObstacle(direction) => Command::BreakObstacle { direction },
        PlayerCommand::Recover => Command::RecoverCheckpoint,
        PlayerCommand::Quit => return None,
    };
    Some(action)
}
