use bayou_core::{
    CellCoord, Difficulty, Direction, Event, PlayerCommand, PortalChoice, Rules, SessionError,
};
use bayou_turn_engine::{
    SessionConfig, SessionOutcome, SessionResult, SessionState, TurnEngine, TurnError,
};
use bayou_world::{query, LayoutSource, WorldConfig};

fn world_config(layout: &str) -> WorldConfig {
    WorldConfig::new(
        LayoutSource::text(layout),
        Difficulty::default().profile(),
        Rules::default(),
    )
}

fn engine(config: WorldConfig) -> TurnEngine {
    TurnEngine::new(SessionConfig::new(config)).expect("session starts")
}

fn resolve(engine: &mut TurnEngine, command: PlayerCommand) -> Vec<Event> {
    engine.resolve(command).expect("turn resolves").events
}

#[test]
fn stepping_onto_a_crocodile_costs_health_but_not_position() {
    let mut engine = engine(
        world_config("P  \n   ").with_crocodile_spawns(vec![CellCoord::new(1, 0)]),
    );

    let _ = resolve(&mut engine, PlayerCommand::Move(Direction::East));

    let player = engine.snapshot().player;
    assert_eq!(player.health, 80);
    assert_eq!(player.cell, CellCoord::new(0, 0));
    assert_eq!(player.status, "You ran into a crocodile! -20 health");
}

#[test]
fn a_single_checkpoint_absorbs_exactly_one_death() {
    let mut engine = engine(world_config("PC#"));
    let _ = resolve(&mut engine, PlayerCommand::Move(Direction::East));
    assert_eq!(engine.snapshot().player.checkpoints, 1);

    for _ in 0..9 {
        let _ = resolve(&mut engine, PlayerCommand::Move(Direction::East));
    }
    assert_eq!(engine.snapshot().player.health, 10);

    let events = resolve(&mut engine, PlayerCommand::Move(Direction::East));
    assert!(events.contains(&Event::PlayerRespawned {
        cell: CellCoord::new(1, 0),
        health: 50,
    }));
    assert_eq!(engine.state(), SessionState::Exploring);
    assert_eq!(engine.snapshot().player.checkpoints, 0);

    for _ in 0..5 {
        let _ = resolve(&mut engine, PlayerCommand::Move(Direction::East));
    }
    assert_eq!(
        engine.state(),
        SessionState::Finished(SessionOutcome::Defeat)
    );
    assert_eq!(
        engine.result(),
        Some(SessionResult {
            outcome: SessionOutcome::Defeat,
            score: 0,
            turns: 16,
        })
    );
    assert_eq!(
        engine.resolve(PlayerCommand::OpenInventory),
        Err(TurnError::SessionFinished)
    );
}

#[test]
fn death_in_the_enemy_phase_skips_the_player_action() {
    let mut engine = engine(world_config("#P   ").with_snake_spawns(vec![CellCoord::new(4, 0)]));

    for _ in 0..7 {
        let _ = resolve(&mut engine, PlayerCommand::Move(Direction::West));
    }
    assert_eq!(engine.snapshot().player.health, 15);

    let events = resolve(&mut engine, PlayerCommand::Move(Direction::West));

    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::PlayerBlocked { .. })));
    assert!(events.contains(&Event::CheckpointsExhausted));
    assert_eq!(engine.snapshot().player.health, 0);
    assert_eq!(
        engine.state(),
        SessionState::Finished(SessionOutcome::Defeat)
    );
}

#[test]
fn portal_pauses_the_session_until_a_choice_is_made() {
    let mut engine = engine(world_config("PO"));

    let report = engine
        .resolve(PlayerCommand::Move(Direction::East))
        .expect("turn resolves");
    assert_eq!(report.state, SessionState::AwaitingPortalChoice);
    assert_eq!(
        engine.resolve(PlayerCommand::OpenInventory),
        Err(TurnError::PortalChoicePending)
    );

    let report = engine
        .choose_portal(PortalChoice::KeepExploring)
        .expect("choice accepted");
    assert_eq!(report.state, SessionState::Exploring);

    let report = engine
        .resolve(PlayerCommand::OpenInventory)
        .expect("turn resolves");
    assert_eq!(report.state, SessionState::AwaitingPortalChoice);

    let report = engine
        .choose_portal(PortalChoice::EnterArena)
        .expect("arena loads");
    assert_eq!(report.state, SessionState::BossFight);
    assert!(report
        .events
        .iter()
        .any(|event| matches!(event, Event::ArenaEntered { .. })));

    let snapshot = engine.snapshot();
    assert_eq!((snapshot.columns, snapshot.rows), (15, 9));
    assert_eq!(snapshot.player.cell, CellCoord::new(2, 1));
    assert!(snapshot.boss.is_some());
    assert_eq!(
        engine.choose_portal(PortalChoice::EnterArena),
        Err(TurnError::NoPortalChoicePending)
    );
}

#[test]
fn arena_without_a_boss_aborts_the_transition() {
    let mut engine = TurnEngine::new(
        SessionConfig::new(world_config("PO")).with_arena(LayoutSource::text("+P+")),
    )
    .expect("session starts");
    let _ = resolve(&mut engine, PlayerCommand::Move(Direction::East));

    assert_eq!(
        engine.choose_portal(PortalChoice::EnterArena),
        Err(TurnError::Session(SessionError::BossMissing))
    );
    assert_eq!(engine.state(), SessionState::AwaitingPortalChoice);
    assert_eq!(engine.snapshot().columns, 2);
}

#[test]
fn defeating_the_boss_wins_the_session() {
    let mut engine = TurnEngine::new(
        SessionConfig::new(world_config("PG        B")).with_seed(5),
    )
    .expect("session starts");
    assert_eq!(engine.state(), SessionState::BossFight);

    let _ = resolve(&mut engine, PlayerCommand::Move(Direction::East));
    let mut turns = 1;
    while engine.state() == SessionState::BossFight {
        let _ = resolve(&mut engine, PlayerCommand::Fire(Direction::East));
        turns += 1;
        assert!(turns <= 11, "boss should fall to ten rounds");
    }

    let result = engine.result().expect("session finished");
    assert_eq!(result.outcome, SessionOutcome::Victory);
    assert_eq!(result.score, 500);
    assert_eq!(result.turns, 11);
    assert!(query::is_boss_defeated(engine.world()));
}

#[test]
fn quitting_ends_the_session_between_turns() {
    let mut engine = engine(world_config("P "));

    let report = engine
        .resolve(PlayerCommand::Quit)
        .expect("quit accepted");

    assert!(report.events.is_empty());
    assert_eq!(report.turn, 0);
    assert_eq!(
        engine.result(),
        Some(SessionResult {
            outcome: SessionOutcome::Quit,
            score: 0,
            turns: 0,
        })
    );
}

#[test]
fn opening_the_inventory_costs_a_turn() {
    let mut engine = engine(world_config("PA"));
    let _ = resolve(&mut engine, PlayerCommand::Move(Direction::East));

    let report = engine
        .resolve(PlayerCommand::OpenInventory)
        .expect("turn resolves");

    assert_eq!(report.turn, 2);
    assert!(report
        .events
        .iter()
        .any(|event| matches!(event, Event::InventoryShown { entries } if entries.len() == 1)));
    assert_eq!(engine.snapshot().player.status, "Inventory: Axe x1");
}

#[test]
fn danger_warning_fills_an_otherwise_quiet_turn() {
    let mut engine = engine(
        world_config("P      \n       \n       ").with_snake_spawns(vec![CellCoord::new(4, 2)]),
    );

    let _ = resolve(&mut engine, PlayerCommand::Move(Direction::East));

    assert_eq!(engine.snapshot().player.status, "Danger detected nearby!");
}

#[test]
fn recovering_never_lands_the_player_on_a_crocodile() {
    let mut engine = engine(
        world_config(" C\nP ").with_crocodile_spawns(vec![CellCoord::new(0, 0)]),
    );
    let turns = [
        PlayerCommand::Move(Direction::East),
        PlayerCommand::Move(Direction::North),
        PlayerCommand::Move(Direction::West),
        PlayerCommand::OpenInventory,
        PlayerCommand::OpenInventory,
        PlayerCommand::Recover,
    ];

    for command in turns {
        if engine.result().is_some() {
            break;
        }
        let _ = resolve(&mut engine, command);

        let snapshot = engine.snapshot();
        let under_player = snapshot
            .cell(snapshot.player.cell)
            .map(|cell| cell.terrain)
            .expect("player stays inside the grid");
        assert!(
            !under_player.is_enemy(),
            "player shares {:?} with {under_player:?}",
            snapshot.player.cell
        );
    }
    assert_eq!(engine.snapshot().player.checkpoints, 0);
}
