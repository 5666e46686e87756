#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Bayou sessions in the terminal.

mod config;
mod high_scores;
mod input;
mod terminal;

use anyhow::{Context, Result};
use bayou_core::{EnemyCount, EnemyPower, MapSize, WELCOME_BANNER};
use bayou_rendering::{
    projectile_paths, Frame, FrameInput, Presentation, Prompt, RenderingBackend, RenderingError,
    Scene,
};
use bayou_turn_engine::{
    SessionConfig, SessionOutcome, SessionResult, SessionState, TurnEngine, TurnReport,
};
use clap::{Parser, ValueEnum};
use config::{FileConfig, Overrides, Settings};
use high_scores::HighScores;
use log::{info, warn};
use std::{
    fs::File,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use terminal::TerminalBackend;

const PROJECTILE_STEP: Duration = Duration::from_millis(60);

/// Survive the bayou, reach the portal and defeat the boss.
#[derive(Debug, Parser)]
#[command(name = "bayou", version, about, long_about = None)]
struct Args {
    /// Map to explore.
    #[arg(long, value_enum)]
    map: Option<MapArg>,
    /// Size of the enemy pools.
    #[arg(long, value_enum)]
    enemies: Option<EnemiesArg>,
    /// Health and damage of the enemies.
    #[arg(long, value_enum)]
    power: Option<PowerArg>,
    /// Seed for the boss's random choices; derived from the clock when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Name recorded in the high-score list; asked for when omitted.
    #[arg(long)]
    name: Option<String>,
    /// TOML file with `[difficulty]`, `[rules]` and `seed`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Skip the projectile flight animation.
    #[arg(long)]
    no_animation: bool,
    /// Write log records to this file, filtered by `RUST_LOG`.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MapArg {
    Small,
    Large,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EnemiesArg {
    Few,
    Many,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PowerArg {
    Weak,
    Strong,
}

impl From<MapArg> for MapSize {
    fn from(value: MapArg) -> Self {
        match value {
            MapArg::Small => Self::Small,
            MapArg::Large => Self::Large,
        }
    }
}

impl From<EnemiesArg> for EnemyCount {
    fn from(value: EnemiesArg) -> Self {
        match value {
            EnemiesArg::Few => Self::Few,
            EnemiesArg::Many => Self::Many,
        }
    }
}

impl From<PowerArg> for EnemyPower {
    fn from(value: PowerArg) -> Self {
        match value {
            PowerArg::Weak => Self::Weak,
            PowerArg::Strong => Self::Strong,
        }
    }
}

/// Entry point for the Bayou command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = file.layer(Overrides {
        map: args.map.map(MapSize::from),
        enemy_count: args.enemies.map(EnemyCount::from),
        enemy_power: args.power.map(EnemyPower::from),
        seed: args.seed,
    });
    let projectile_step = (!args.no_animation).then_some(PROJECTILE_STEP);

    let name = match args.name {
        Some(name) => name,
        None => ask("Enter your name: ")?,
    };
    let name = if name.is_empty() {
        "Player".to_owned()
    } else {
        name
    };

    let mut scores = HighScores::new();
    let mut seed = settings.seed.unwrap_or_else(clock_seed);
    loop {
        let (result, final_frame) = play(&settings, seed, projectile_step)?;
        let rank = scores.record(&name, result.score);
        info!("{name} finished with {result:?}");

        print_summary(&result, &final_frame, rank, &scores)?;
        if !ask("Play again? (y/n): ")?.eq_ignore_ascii_case("y") {
            break;
        }
        seed = seed.wrapping_add(1);
    }
    Ok(())
}

fn play(
    settings: &Settings,
    seed: u64,
    projectile_step: Option<Duration>,
) -> Result<(SessionResult, Frame)> {
    let config = SessionConfig::for_difficulty(settings.difficulty, settings.rules).with_seed(seed);
    let mut engine = TurnEngine::new(config).context("failed to start the session")?;
    let scene = Scene::new(Frame::compose(&engine.snapshot())?);
    let presentation = Presentation::new("Bayou", WELCOME_BANNER, projectile_step, scene);

    let mut failure = None;
    TerminalBackend::new().run(presentation, |input, scene| {
        if let Err(error) = advance(&mut engine, input, scene) {
            scene.finished = true;
            failure = Some(error);
        }
    })?;
    if let Some(error) = failure {
        return Err(error).context("failed to draw the world");
    }

    let result = engine
        .result()
        .context("the terminal closed before the session finished")?;
    Ok((result, Frame::compose(&engine.snapshot())?))
}

fn advance(
    engine: &mut TurnEngine,
    input: FrameInput,
    scene: &mut Scene,
) -> Result<(), RenderingError> {
    let outcome = match input {
        FrameInput::Command(command) => engine.resolve(command),
        FrameInput::Portal(choice) => engine.choose_portal(choice),
    };

    match outcome {
        Ok(report) => *scene = scene_after(engine, &report)?,
        Err(error) => {
            warn!("rejected {input:?}: {error}");
            scene.notice = Some(format!("Cannot do that: {error}"));
        }
    }
    Ok(())
}

fn scene_after(engine: &TurnEngine, report: &TurnReport) -> Result<Scene, RenderingError> {
    let mut scene = Scene::new(Frame::compose(&engine.snapshot())?);
    scene.projectiles = projectile_paths(&report.events);
    scene.prompt =
        (report.state == SessionState::AwaitingPortalChoice).then_some(Prompt::PortalChoice);
    scene.finished = matches!(report.state, SessionState::Finished(_));
    Ok(scene)
}

fn print_summary(
    result: &SessionResult,
    final_frame: &Frame,
    rank: Option<usize>,
    scores: &HighScores,
) -> Result<()> {
    let headline = match result.outcome {
        SessionOutcome::Victory => "The boss is defeated. You conquered the bayou!",
        SessionOutcome::Defeat => "Game over.",
        SessionOutcome::Quit => "You left the bayou.",
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}\n", final_frame.to_text())?;
    writeln!(stdout, "{headline}")?;
    writeln!(
        stdout,
        "Final score: {} after {} turns",
        result.score, result.turns
    )?;
    if let Some(rank) = rank {
        writeln!(stdout, "New high score, rank {rank}!")?;
    }
    writeln!(stdout, "\nHIGH SCORES")?;
    for line in scores.lines() {
        writeln!(stdout, "{line}")?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn ask(question: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{question}")?;
    stdout.flush()?;

    let mut line = String::new();
    let _ = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_owned())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos()))
        .unwrap_or(0)
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"));
    if let Some(path) = path {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file at {}", path.display()))?;
        let _ = builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("failed to install the logger")
}
