use bayou_core::{CellCoord, LayoutError, Terrain};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;

/// Source from which a grid is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutSource {
    /// Newline-delimited rows with one character per cell.
    Text(String),
    /// Seeded random terrain of the requested dimensions.
    Random {
        /// Number of columns.
        columns: u32,
        /// Number of rows.
        rows: u32,
        /// Seed for the terrain generator.
        seed: u64,
    },
}

impl LayoutSource {
    /// Convenience constructor for textual layouts.
    #[must_use]
    pub fn text(layout: impl Into<String>) -> Self {
        Self::Text(layout.into())
    }

    pub(crate) fn build(&self) -> Result<Layout, LayoutError> {
        match self {
            Self::Text(text) => parse(text),
            Self::Random {
                columns,
                rows,
                seed,
            } => generate(*columns, *rows, *seed),
        }
    }
}

/// Freshly built grid together with the player's start cell.
#[derive(Debug)]
pub(crate) struct Layout {
    pub(crate) grid: Grid,
    pub(crate) start: CellCoord,
}

fn terrain_for(symbol: char) -> Terrain {
    match symbol {
        '+' => Terrain::Wall,
        '#' => Terrain::Thorns,
        'G' => Terrain::WeaponPickup,
        'A' => Terrain::Axe,
        'H' => Terrain::HealthPack,
        'F' => Terrain::Food,
        'O' => Terrain::Portal,
        'B' => Terrain::Boss,
        'C' => Terrain::Checkpoint,
        _ => Terrain::OpenGround,
    }
}

fn parse(text: &str) -> Result<Layout, LayoutError> {
    let mut lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        let _ = lines.pop();
    }

    let columns = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return Err(LayoutError::Empty);
    }

    let columns = columns as u32;
    let rows = lines.len() as u32;
    let mut terrain = Vec::with_capacity(lines.len().saturating_mul(columns as usize));
    let mut start: Option<CellCoord> = None;

    for (row, line) in lines.iter().enumerate() {
        let mut width = 0;
        for (column, symbol) in line.chars().enumerate() {
            width += 1;
            if symbol == 'P' {
                let cell = CellCoord::new(column as u32, row as u32);
                if let Some(first) = start {
                    return Err(LayoutError::DuplicatePlayerStart {
                        first,
                        second: cell,
                    });
                }
                start = Some(cell);
            }
            terrain.push(terrain_for(symbol));
        }
        for _ in width..columns {
            terrain.push(Terrain::OpenGround);
        }
    }

    let start = start.ok_or(LayoutError::MissingPlayerStart)?;
    Ok(Layout {
        grid: Grid::from_terrain(columns, rows, terrain),
        start,
    })
}

/// Largest cell count a random layout may request.
const MAX_RANDOM_CELLS: u32 = 1 << 20;

const RANDOM_TERRAIN: [(u32, Terrain); 6] = [
    (10, Terrain::Wall),
    (8, Terrain::Thorns),
    (3, Terrain::Food),
    (2, Terrain::Axe),
    (2, Terrain::HealthPack),
    (1, Terrain::WeaponPickup),
];

fn generate(columns: u32, rows: u32, seed: u64) -> Result<Layout, LayoutError> {
    if columns == 0 || rows == 0 {
        return Err(LayoutError::EmptyDimensions { columns, rows });
    }

    let cells = columns
        .checked_mul(rows)
        .filter(|cells| *cells <= MAX_RANDOM_CELLS)
        .ok_or(LayoutError::TooLarge { columns, rows })?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut terrain = Vec::with_capacity(cells as usize);
    for _ in 0..cells {
        let mut roll = rng.gen_range(0..100);
        let mut chosen = Terrain::OpenGround;
        for (weight, kind) in RANDOM_TERRAIN {
            if roll < weight {
                chosen = kind;
                break;
            }
            roll -= weight;
        }
        terrain.push(chosen);
    }

    let start = CellCoord::new(0, 0);
    terrain[0] = Terrain::OpenGround;
    if let Some(last) = terrain.last_mut() {
        if cells > 1 {
            *last = Terrain::Portal;
        }
    }

    Ok(Layout {
        grid: Grid::from_terrain(columns, rows, terrain),
        start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbols_and_start_marker() {
        let layout = LayoutSource::text("+P#\nGAH\nFOC\n B+\n")
            .build()
            .expect("layout parses");

        assert_eq!(layout.start, CellCoord::new(1, 0));
        assert_eq!(layout.grid.columns(), 3);
        assert_eq!(layout.grid.rows(), 4);
        assert_eq!(layout.grid.terrain(CellCoord::new(1, 0)), Some(Terrain::OpenGround));
        assert_eq!(layout.grid.terrain(CellCoord::new(2, 0)), Some(Terrain::Thorns));
        assert_eq!(layout.grid.terrain(CellCoord::new(0, 1)), Some(Terrain::WeaponPickup));
        assert_eq!(layout.grid.terrain(CellCoord::new(1, 2)), Some(Terrain::Portal));
        assert_eq!(layout.grid.terrain(CellCoord::new(2, 2)), Some(Terrain::Checkpoint));
        assert_eq!(layout.grid.terrain(CellCoord::new(0, 3)), Some(Terrain::OpenGround));
        assert_eq!(layout.grid.terrain(CellCoord::new(1, 3)), Some(Terrain::Boss));
    }

    #[test]
    fn ragged_rows_are_padded_with_open_ground() {
        let layout = LayoutSource::text("++++\n+P\n++++")
            .build()
            .expect("layout parses");

        assert_eq!(layout.grid.columns(), 4);
        assert_eq!(layout.grid.terrain(CellCoord::new(3, 1)), Some(Terrain::OpenGround));
    }

    #[test]
    fn trailing_newline_does_not_add_a_row() {
        let with = LayoutSource::text("P \n  \n").build().expect("parses");
        let without = LayoutSource::text("P \n  ").build().expect("parses");
        assert_eq!(with.grid.rows(), 2);
        assert_eq!(without.grid.rows(), 2);
    }

    #[test]
    fn rejects_missing_and_duplicate_start() {
        assert_eq!(
            LayoutSource::text("+++\n+ +").build().map(|_| ()),
            Err(LayoutError::MissingPlayerStart)
        );
        assert_eq!(
            LayoutSource::text("P P").build().map(|_| ()),
            Err(LayoutError::DuplicatePlayerStart {
                first: CellCoord::new(0, 0),
                second: CellCoord::new(2, 0),
            })
        );
        assert_eq!(
            LayoutSource::text("\n\n").build().map(|_| ()),
            Err(LayoutError::Empty)
        );
    }

    #[test]
    fn random_layouts_are_reproducible() {
        let source = LayoutSource::Random {
            columns: 12,
            rows: 9,
            seed: 17,
        };
        let first = source.build().expect("generates");
        let second = source.build().expect("generates");

        let first_cells: Vec<_> = first.grid.iter().collect();
        let second_cells: Vec<_> = second.grid.iter().collect();
        assert_eq!(first_cells, second_cells);
        assert_eq!(first.grid.terrain(first.start), Some(Terrain::OpenGround));
        assert!(first_cells.iter().all(|(_, terrain)| !terrain.is_enemy()));
    }

    #[test]
    fn random_layouts_reject_empty_dimensions() {
        let source = LayoutSource::Random {
            columns: 0,
            rows: 4,
            seed: 1,
        };
        assert_eq!(
            source.build().map(|_| ()),
            Err(LayoutError::EmptyDimensions {
                columns: 0,
                rows: 4
            })
        );
    }

    #[test]
    fn random_layouts_reject_oversized_dimensions() {
        let overflowing = LayoutSource::Random {
            columns: 65_536,
            rows: 65_536,
            seed: 1,
        };
        assert_eq!(
            overflowing.build().map(|_| ()),
            Err(LayoutError::TooLarge {
                columns: 65_536,
                rows: 65_536
            })
        );

        let above_limit = LayoutSource::Random {
            columns: MAX_RANDOM_CELLS,
            rows: 2,
            seed: 1,
        };
        assert!(matches!(
            above_limit.build(),
            Err(LayoutError::TooLarge { .. })
        ));

        let at_limit = LayoutSource::Random {
            columns: MAX_RANDOM_CELLS,
            rows: 1,
            seed: 1,
        };
        assert!(at_limit.build().is_ok());
    }
}
