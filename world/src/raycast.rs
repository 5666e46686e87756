use bayou_core::{CellCoord, Heading, RayHit, Terrain};

use crate::grid::Grid;

/// Cells crossed by a projectile and what stopped it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Trace {
    pub(crate) path: Vec<CellCoord>,
    pub(crate) hit: RayHit,
}

/// Traces from `origin` along `heading` until the edge, the target or the first non-open cell.
///
/// `target` is the player's cell for enemy shots and `None` for the player's own fire.
pub(crate) fn trace(
    grid: &Grid,
    origin: CellCoord,
    heading: Heading,
    target: Option<CellCoord>,
) -> Trace {
    let mut path = Vec::new();
    let mut current = origin;

    if heading.is_stationary() {
        return Trace {
            path,
            hit: RayHit::Edge,
        };
    }

    loop {
        let Some(next) = grid.step(current, heading) else {
            return Trace {
                path,
                hit: RayHit::Edge,
            };
        };
        if target == Some(next) {
            return Trace {
                path,
                hit: RayHit::Player { cell: next },
            };
        }
        match grid.terrain(next) {
            Some(Terrain::OpenGround) => {
                path.push(next);
                current = next;
            }
            Some(terrain) => {
                return Trace {
                    path,
                    hit: RayHit::Obstacle {
                        cell: next,
                        terrain,
                    },
                }
            }
            None => {
                return Trace {
                    path,
                    hit: RayHit::Edge,
                }
            }
        }
    }
}
