use bayou_core::{CellCoord, Direction, Heading, Terrain};

/// Single grid cell stored in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    coord: CellCoord,
    terrain: Terrain,
    health: u32,
    neighbors: [Option<usize>; 4],
}

/// Row-major cell arena with a neighbour table linked after every cell exists.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds the arena from row-major terrain; `terrain` must hold `columns * rows` entries.
    pub(crate) fn from_terrain(columns: u32, rows: u32, terrain: Vec<Terrain>) -> Self {
        let mut cells: Vec<Cell> = terrain
            .into_iter()
            .enumerate()
            .map(|(index, terrain)| {
                let index = index as u32;
                Cell {
                    coord: CellCoord::new(index % columns, index / columns),
                    terrain,
                    health: 0,
                    neighbors: [None; 4],
                }
            })
            .collect();

        for index in 0..cells.len() {
            let coord = cells[index].coord;
            for direction in Direction::ALL {
                cells[index].neighbors[direction.index()] = coord
                    .step(Heading::from(direction), columns, rows)
                    .map(|neighbor| linear_index(neighbor, columns));
            }
        }

        Self {
            columns,
            rows,
            cells,
        }
    }

    pub(crate) const fn columns(&self) -> u32 {
        self.columns
    }

    pub(crate) const fn rows(&self) -> u32 {
        self.rows
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            Some(linear_index(cell, self.columns))
        } else {
            None
        }
    }

    fn cell(&self, cell: CellCoord) -> Option<&Cell> {
        self.index(cell).and_then(|index| self.cells.get(index))
    }

    fn cell_mut(&mut self, cell: CellCoord) -> Option<&mut Cell> {
        self.index(cell).and_then(move |index| self.cells.get_mut(index))
    }

    /// Terrain stored in the cell, or `None` outside the grid.
    pub(crate) fn terrain(&self, cell: CellCoord) -> Option<Terrain> {
        self.cell(cell).map(|cell| cell.terrain)
    }

    /// Remaining hits of the enemy standing in the cell.
    pub(crate) fn health(&self, cell: CellCoord) -> u32 {
        self.cell(cell).map_or(0, |cell| cell.health)
    }

    pub(crate) fn set_health(&mut self, cell: CellCoord, health: u32) {
        if let Some(cell) = self.cell_mut(cell) {
            cell.health = health;
        }
    }

    /// Places terrain in the cell, resetting any enemy health it carried.
    pub(crate) fn set_terrain(&mut self, cell: CellCoord, terrain: Terrain) {
        if let Some(cell) = self.cell_mut(cell) {
            cell.terrain = terrain;
            cell.health = 0;
        }
    }

    /// Places an enemy together with its health.
    pub(crate) fn occupy(&mut self, cell: CellCoord, terrain: Terrain, health: u32) {
        if let Some(cell) = self.cell_mut(cell) {
            cell.terrain = terrain;
            cell.health = health;
        }
    }

    /// Moves the occupant of `from` into `to`, leaving open ground behind.
    pub(crate) fn relocate_occupant(&mut self, from: CellCoord, to: CellCoord) {
        let Some(occupant) = self.cell(from).copied() else {
            return;
        };
        self.occupy(to, occupant.terrain, occupant.health);
        self.set_terrain(from, Terrain::OpenGround);
    }

    /// Looks up the linked neighbour in a cardinal direction.
    pub(crate) fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        self.cell(cell)
            .and_then(|cell| cell.neighbors[direction.index()])
            .and_then(|index| self.cells.get(index))
            .map(|neighbor| neighbor.coord)
    }

    /// Follows a heading one step, including diagonals.
    pub(crate) fn step(&self, cell: CellCoord, heading: Heading) -> Option<CellCoord> {
        cell.step(heading, self.columns, self.rows)
    }

    /// Iterator over every cell and its terrain in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (CellCoord, Terrain)> + '_ {
        self.cells.iter().map(|cell| (cell.coord, cell.terrain))
    }
}

fn linear_index(cell: CellCoord, columns: u32) -> usize {
    cell.row() as usize * columns as usize + cell.column() as usize
}
