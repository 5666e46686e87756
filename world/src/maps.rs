//! Bundled map layouts and their enemy spawn points.

use bayou_core::{CellCoord, MapSize};

/// Layout text paired with the cells where enemies may spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapBlueprint {
    /// Newline-delimited layout rows.
    pub layout: &'static str,
    /// Crocodile spawn cells in activation order.
    pub crocodile_spawns: &'static [CellCoord],
    /// Snake spawn cells in activation order.
    pub snake_spawns: &'static [CellCoord],
}

/// Compact exploration map.
pub const SMALL_MAP: MapBlueprint = MapBlueprint {
    layout: concat!(
        "+++++++++++++++\n",
        "+P C  G      A+\n",
        "+++++++++++#+++\n",
        "+A            +\n",
        "+           H +\n",
        "++#++++++++++++\n",
        "+ A    #    C +\n",
        "+      #      +\n",
        "+      #   A  +\n",
        "+      #      +\n",
        "+F  A  #      +\n",
        "+++++++++++#+++\n",
        "+ C         ##+\n",
        "+  F   A   # O+\n",
        "+++++++++++++++",
    ),
    crocodile_spawns: &[
        CellCoord::new(3, 3),
        CellCoord::new(3, 12),
        CellCoord::new(7, 3),
        CellCoord::new(8, 12),
    ],
    snake_spawns: &[CellCoord::new(4, 8), CellCoord::new(10, 8)],
};

/// Larger exploration map.
pub const LARGE_MAP: MapBlueprint = MapBlueprint {
    layout: concat!(
        "++++++++++++++++++++\n",
        "+P  C A     G    A +\n",
        "+++++++++++++#++++++\n",
        "+  A       #    H  +\n",
        "+           #####  +\n",
        "++##++++++++++++++++\n",
        "+     A         C  +\n",
        "+           F      +\n",
        "+  A        #####  +\n",
        "+H    #    A       +\n",
        "+#+++#++++#+++ +++++\n",
        "+  C    A          +\n",
        "+ A         ###    +\n",
        "++++++#+++#+++++++++\n",
        "+                A +\n",
        "+  ##       F      +\n",
        "+      A          +\n",
        "+   H         #####+\n",
        "+         #### # O +\n",
        "++++++++++++++++++++",
    ),
    crocodile_spawns: &[
        CellCoord::new(4, 3),
        CellCoord::new(4, 11),
        CellCoord::new(17, 7),
        CellCoord::new(8, 15),
    ],
    snake_spawns: &[CellCoord::new(4, 8), CellCoord::new(14, 15)],
};

/// Arena that replaces the explored map for the boss fight.
pub const BOSS_ARENA: &str = concat!(
    "+++++++++++++++\n",
    "+ P           +\n",
    "+          #  +\n",
    "+    ++       +\n",
    "+  ##     B   +\n",
    "+           H +\n",
    "+  ##         +\n",
    "+     F    ## +\n",
    "+++++++++++++++\n",
);

/// Selects the bundled blueprint for a map size.
#[must_use]
pub const fn blueprint(size: MapSize) -> &'static MapBlueprint {
    match size {
        MapSize::Small => &SMALL_MAP,
        MapSize::Large => &LARGE_MAP,
    }
}
