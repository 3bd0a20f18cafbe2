//! Food placement on a free grid cell.

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use super::grid::{Cell, Grid};
use crate::error::GameError;

/// Random draws tried before falling back to enumerating the free cells
const MAX_SAMPLES: usize = 64;

/// Pick a uniformly random cell of `grid` that is not in `occupied`.
///
/// Rejection sampling is tried first; once the snake covers most of the
/// board the free cells are enumerated instead. A grid with no free cell
/// yields `GameError::NoFreeCell`.
pub fn place_food<R: Rng>(
    rng: &mut R,
    grid: &Grid,
    occupied: &HashSet<Cell>,
) -> Result<Cell, GameError> {
    if occupied.len() < grid.cell_count() {
        for _ in 0..MAX_SAMPLES {
            let cell = Cell::new(
                rng.gen_range(0..grid.columns()),
                rng.gen_range(0..grid.rows()),
            );
            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }
    }

    grid.cells()
        .filter(|cell| !occupied.contains(cell))
        .choose(rng)
        .ok_or(GameError::NoFreeCell)
}
