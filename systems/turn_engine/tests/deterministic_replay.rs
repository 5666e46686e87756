use bayou_core::{
    Difficulty, Direction, EnemyCount, EnemyPower, MapSize, PlayerCommand, PortalChoice, Rules,
    WorldSnapshot,
};
use bayou_turn_engine::{SessionConfig, SessionState, TurnEngine, TurnError, TurnReport};

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    reports: Vec<Result<TurnReport, TurnError>>,
    snapshot: WorldSnapshot,
    state: SessionState,
}

fn scripted_commands() -> Vec<PlayerCommand> {
    use Direction::{East, North, South, West};

    let mut commands = vec![
        PlayerCommand::Move(East),
        PlayerCommand::Move(East),
        PlayerCommand::Move(East),
        PlayerCommand::Move(East),
        PlayerCommand::Move(East),
        PlayerCommand::Fire(East),
        PlayerCommand::OpenInventory,
        PlayerCommand::Move(South),
        PlayerCommand::BreakObstacle(South),
        PlayerCommand::Move(West),
        PlayerCommand::UseHealthPack,
        PlayerCommand::Recover,
        PlayerCommand::Move(North),
    ];
    for _ in 0..6 {
        commands.push(PlayerCommand::Move(East));
    }
    for _ in 0..4 {
        commands.push(PlayerCommand::Fire(South));
    }
    commands
}

fn replay(difficulty: Difficulty, seed: u64) -> ReplayOutcome {
    let mut engine = TurnEngine::new(
        SessionConfig::for_difficulty(difficulty, Rules::default()).with_seed(seed),
    )
    .expect("session starts");

    let mut reports = Vec::new();
    for command in scripted_commands() {
        if engine.state() == SessionState::AwaitingPortalChoice {
            reports.push(engine.choose_portal(PortalChoice::KeepExploring));
        }
        reports.push(engine.resolve(command));
    }

    ReplayOutcome {
        reports,
        snapshot: engine.snapshot(),
        state: engine.state(),
    }
}

#[test]
fn identical_scripts_replay_identically() {
    let difficulty = Difficulty::new(MapSize::Small, EnemyCount::Many, EnemyPower::Strong);

    let first = replay(difficulty, 7);
    let second = replay(difficulty, 7);

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first.reports.iter().all(Result::is_ok));
}

#[test]
fn large_map_replays_identically() {
    let difficulty = Difficulty::new(MapSize::Large, EnemyCount::Few, EnemyPower::Weak);

    let first = replay(difficulty, 11);
    let second = replay(difficulty, 11);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.snapshot.columns, 20);
}
