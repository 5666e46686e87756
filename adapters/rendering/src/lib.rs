#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Bayou adapters.
//!
//! Frames are glyph grids composed from [`WorldSnapshot`]s. Backends only decide
//! how characters and colours reach the screen, so composing a frame never
//! touches a terminal and can be tested directly.

use anyhow::Result as AnyResult;
use bayou_core::{
    BossSnapshot, CellCoord, Event, PlayerCommand, PortalChoice, Terrain, WorldSnapshot,
    CHECKPOINT_CAPACITY,
};
use std::{error::Error, fmt, time::Duration};

/// RGB color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// Creates a color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

const RED: Color = Color::from_rgb_u8(220, 60, 60);
const GREEN: Color = Color::from_rgb_u8(80, 200, 90);
const YELLOW: Color = Color::from_rgb_u8(230, 200, 60);
const BLUE: Color = Color::from_rgb_u8(70, 110, 230);
const MAGENTA: Color = Color::from_rgb_u8(200, 90, 200);
const CYAN: Color = Color::from_rgb_u8(80, 210, 220);
const WHITE: Color = Color::from_rgb_u8(235, 235, 235);

/// Single character cell of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    /// Character drawn for the cell.
    pub symbol: char,
    /// Foreground colour, `None` for the backend's default.
    pub color: Option<Color>,
    /// Whether the glyph is drawn in bold.
    pub bold: bool,
}

impl Glyph {
    /// Glyph marking the player's cell.
    pub const PLAYER: Self = Self::colored('P', GREEN).emphasized();

    /// Glyph drawn along a projectile's flight path.
    pub const PROJECTILE: Self = Self::colored('*', CYAN);

    const fn plain(symbol: char) -> Self {
        Self {
            symbol,
            color: None,
            bold: false,
        }
    }

    const fn colored(symbol: char, color: Color) -> Self {
        Self {
            symbol,
            color: Some(color),
            bold: false,
        }
    }

    const fn emphasized(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Glyph used to draw the provided terrain.
    #[must_use]
    pub const fn for_terrain(terrain: Terrain) -> Self {
        match terrain {
            Terrain::OpenGround => Self::plain('.'),
            Terrain::Thorns => Self::plain('#'),
            Terrain::Wall => Self::colored('W', BLUE),
            Terrain::Crocodile => Self::colored('C', RED),
            Terrain::Snake => Self::colored('S', YELLOW),
            Terrain::Food => Self::colored('F', GREEN),
            Terrain::WeaponPickup => Self::colored('G', BLUE),
            Terrain::Projectile => Self::PROJECTILE,
            Terrain::Axe => Self::colored('^', MAGENTA),
            Terrain::HealthPack => Self::colored('H', WHITE),
            Terrain::Portal => Self::colored('O', CYAN).emphasized(),
            Terrain::Boss => Self::colored('B', RED).emphasized(),
            Terrain::Checkpoint => Self::colored('C', GREEN).emphasized(),
        }
    }
}

/// Status block drawn beneath the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Player health.
    pub health: i32,
    /// Player score.
    pub score: u32,
    /// Checkpoints available for recovery.
    pub checkpoints: usize,
    /// Boss state while the arena is active.
    pub boss: Option<BossSnapshot>,
    /// Status message of the last turn.
    pub status: String,
}

impl Hud {
    /// Extracts the status block from a world snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &WorldSnapshot) -> Self {
        Self {
            health: snapshot.player.health,
            score: snapshot.player.score,
            checkpoints: snapshot.player.checkpoints,
            boss: snapshot.boss,
            status: snapshot.player.status.clone(),
        }
    }

    /// Text lines of the status block, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Score: {} | Health: {} | Checkpoints: {}/{}",
            self.score, self.health, self.checkpoints, CHECKPOINT_CAPACITY
        )];
        if let Some(boss) = &self.boss {
            lines.push(format!(
                "Boss: {} health | Phase {}",
                boss.health,
                boss.phase.number()
            ));
        }
        lines.push(self.status.clone());
        lines
    }
}

/// Glyph grid plus status block describing one screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    columns: u32,
    rows: u32,
    glyphs: Vec<Glyph>,
    hud: Hud,
}

impl Frame {
    /// Composes a frame from a world snapshot.
    ///
    /// The player glyph replaces whatever terrain lies beneath the player.
    pub fn compose(snapshot: &WorldSnapshot) -> Result<Self, RenderingError> {
        let expected = usize::try_from(u64::from(snapshot.columns) * u64::from(snapshot.rows))
            .map_err(|_| RenderingError::OversizedGrid {
                columns: snapshot.columns,
                rows: snapshot.rows,
            })?;
        if snapshot.cells.len() != expected {
            return Err(RenderingError::CellCountMismatch {
                expected,
                actual: snapshot.cells.len(),
            });
        }

        let glyphs = snapshot
            .cells
            .iter()
            .map(|cell| {
                if cell.is_player {
                    Glyph::PLAYER
                } else {
                    Glyph::for_terrain(cell.terrain)
                }
            })
            .collect();

        Ok(Self {
            columns: snapshot.columns,
            rows: snapshot.rows,
            glyphs,
            hud: Hud::from_snapshot(snapshot),
        })
    }

    /// Number of glyph columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of glyph rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Status block drawn beneath the grid.
    #[must_use]
    pub const fn hud(&self) -> &Hud {
        &self.hud
    }

    /// Glyph drawn at the provided cell, if it lies inside the frame.
    #[must_use]
    pub fn glyph(&self, cell: CellCoord) -> Option<Glyph> {
        self.index(cell)
            .and_then(|index| self.glyphs.get(index).copied())
    }

    /// Iterator over the glyph rows, top to bottom.
    pub fn grid_rows(&self) -> impl Iterator<Item = &[Glyph]> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.glyphs.chunks(width)
    }

    /// Returns a copy of the frame with a projectile drawn on `cell`.
    ///
    /// Cells outside the frame leave it unchanged.
    #[must_use]
    pub fn with_projectile(&self, cell: CellCoord) -> Self {
        let mut frame = self.clone();
        if let Some(glyph) = frame
            .index(cell)
            .and_then(|index| frame.glyphs.get_mut(index))
        {
            *glyph = Glyph::PROJECTILE;
        }
        frame
    }

    /// Plain-text rendition without colours, one grid row per line followed by the status block.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = self
            .grid_rows()
            .map(|row| row.iter().map(|glyph| format!("{} ", glyph.symbol)).collect())
            .collect();
        lines.extend(self.hud.lines());
        lines.join("\n")
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        Some(row * width + column)
    }
}

/// Question the backend must ask before the next command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prompt {
    /// The player stands on the portal.
    PortalChoice,
}

impl Prompt {
    /// Text shown while the prompt is pending.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::PortalChoice => "Enter the boss arena? [1] Enter  [2] Keep exploring",
        }
    }
}

/// Input decoded by a backend and handed to the scene update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameInput {
    /// Command for the next turn.
    Command(PlayerCommand),
    /// Answer to a pending [`Prompt::PortalChoice`].
    Portal(PortalChoice),
}

/// Everything a backend draws after a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Frame showing the world after the turn.
    pub frame: Frame,
    /// Projectile paths fired during the turn, in firing order.
    pub projectiles: Vec<Vec<CellCoord>>,
    /// Question that must be answered before the next command.
    pub prompt: Option<Prompt>,
    /// Adapter message shown beneath the status block.
    pub notice: Option<String>,
    /// Whether the session ended and the backend should stop.
    pub finished: bool,
}

impl Scene {
    /// Creates a scene showing `frame` with nothing pending.
    #[must_use]
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            projectiles: Vec::new(),
            prompt: None,
            notice: None,
            finished: false,
        }
    }

    /// Frames showing each projectile advancing one cell at a time.
    ///
    /// Skipping these frames never changes what the final frame shows.
    #[must_use]
    pub fn animation_frames(&self) -> Vec<Frame> {
        self.projectiles
            .iter()
            .flatten()
            .map(|cell| self.frame.with_projectile(*cell))
            .collect()
    }
}

/// Collects the projectile paths reported by a turn's events.
#[must_use]
pub fn projectile_paths(events: &[Event]) -> Vec<Vec<CellCoord>> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::ProjectileTraced { path, .. } if !path.is_empty() => Some(path.clone()),
            _ => None,
        })
        .collect()
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Title shown above the grid.
    pub title: String,
    /// Banner shown before the first frame.
    pub banner: String,
    /// Delay between projectile animation frames, `None` to skip the animation.
    pub projectile_step: Option<Duration>,
    /// Scene displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T, B>(title: T, banner: B, projectile_step: Option<Duration>, scene: Scene) -> Self
    where
        T: Into<String>,
        B: Into<String>,
    {
        Self {
            title: title.into(),
            banner: banner.into(),
            projectile_step,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Bayou scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the scene reports that the session finished.
    ///
    /// The provided `update_scene` closure receives every decoded input and
    /// refreshes the scene that is drawn next.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene);
}

/// Errors that can occur when composing frames.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The snapshot does not carry one cell per grid position.
    CellCountMismatch {
        /// Cells implied by the snapshot dimensions.
        expected: usize,
        /// Cells actually present.
        actual: usize,
    },
    /// The grid dimensions do not fit in memory on this platform.
    OversizedGrid {
        /// Reported column count.
        columns: u32,
        /// Reported row count.
        rows: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellCountMismatch { expected, actual } => {
                write!(f, "snapshot carries {actual} cells but {expected} were expected")
            }
            Self::OversizedGrid { columns, rows } => {
                write!(f, "grid of {columns}x{rows} cells is too large to render")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use bayou_core::{BossPhase, CellSnapshot, PlayerSnapshot, RayHit, Shooter};

    fn snapshot(rows: &[&str], player: CellCoord) -> WorldSnapshot {
        let mut cells = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            for (column, symbol) in line.chars().enumerate() {
                let cell = CellCoord::new(column as u32, row as u32);
                let terrain = match symbol {
                    '+' => Terrain::Wall,
                    '#' => Terrain::Thorns,
                    'C' => Terrain::Crocodile,
                    'S' => Terrain::Snake,
                    'K' => Terrain::Checkpoint,
                    _ => Terrain::OpenGround,
                };
                cells.push(CellSnapshot {
                    cell,
                    terrain,
                    is_player: cell == player,
                });
            }
        }

        WorldSnapshot {
            columns: rows[0].len() as u32,
            rows: rows.len() as u32,
            cells,
            player: PlayerSnapshot {
                cell: player,
                health: 90,
                score: 175,
                status: "Checkpoint saved.".to_owned(),
                inventory: Vec::new(),
                checkpoints: 1,
                has_weapon: false,
                ready_for_boss: false,
            },
            boss: None,
        }
    }

    #[test]
    fn compose_draws_the_player_over_terrain() {
        let frame = Frame::compose(&snapshot(&["+K ", "#CS"], CellCoord::new(1, 0)))
            .expect("snapshot is complete");

        assert_eq!(frame.glyph(CellCoord::new(1, 0)), Some(Glyph::PLAYER));
        assert_eq!(
            frame.glyph(CellCoord::new(1, 1)),
            Some(Glyph::for_terrain(Terrain::Crocodile))
        );
        assert_eq!(frame.glyph(CellCoord::new(3, 0)), None);
    }

    #[test]
    fn text_rendition_matches_the_grid_and_status_block() {
        let frame = Frame::compose(&snapshot(&["+K ", "#CS"], CellCoord::new(2, 0)))
            .expect("snapshot is complete");

        assert_eq!(
            frame.to_text(),
            "W C P \n# C S \nScore: 175 | Health: 90 | Checkpoints: 1/3\nCheckpoint saved."
        );
    }

    #[test]
    fn incomplete_snapshots_are_rejected_without_panicking() {
        let mut broken = snapshot(&["   "], CellCoord::new(0, 0));
        let _ = broken.cells.pop();

        assert_eq!(
            Frame::compose(&broken),
            Err(RenderingError::CellCountMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn hud_reports_the_boss_while_it_is_active() {
        let mut arena = snapshot(&["   "], CellCoord::new(0, 0));
        arena.boss = Some(BossSnapshot {
            cell: CellCoord::new(2, 0),
            health: 40,
            phase: BossPhase::Second,
            attack_ready: false,
            move_ready: false,
        });

        let hud = Hud::from_snapshot(&arena);

        assert_eq!(hud.lines()[1], "Boss: 40 health | Phase 2");
    }

    #[test]
    fn projectile_animation_walks_the_traced_path() {
        let world = snapshot(&["    "], CellCoord::new(0, 0));
        let events = vec![
            Event::TurnStarted { turn: 1 },
            Event::ProjectileTraced {
                shooter: Shooter::Player,
                path: vec![CellCoord::new(1, 0), CellCoord::new(2, 0)],
                hit: RayHit::Edge,
            },
            Event::ProjectileTraced {
                shooter: Shooter::Player,
                path: Vec::new(),
                hit: RayHit::Edge,
            },
        ];
        let mut scene = Scene::new(Frame::compose(&world).expect("snapshot is complete"));
        scene.projectiles = projectile_paths(&events);

        let frames = scene.animation_frames();

        assert_eq!(scene.projectiles.len(), 1);
        assert_eq!(frames.len(), 2);
        assert_eq!(
            frames[1].glyph(CellCoord::new(2, 0)),
            Some(Glyph::PROJECTILE)
        );
        assert_eq!(
            frames[1].glyph(CellCoord::new(1, 0)),
            Some(Glyph::for_terrain(Terrain::OpenGround))
        );
    }
}
