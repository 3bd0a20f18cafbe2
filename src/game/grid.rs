//! Grid geometry: square cells laid over a rectangular play area.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::error::GameError;

/// A cell on the game grid, in grid units (pixel position / cell size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Valid cell range of a play area.
///
/// Columns run over `[0, columns)` and rows over `[0, rows)`, where
/// `columns = floor(width / cell_size)` and `rows = floor(height / cell_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    columns: i32,
    rows: i32,
}

impl Grid {
    /// Derive the grid from play-area dimensions in pixels
    pub fn from_pixels(width: u32, height: u32, cell_size: u32) -> Result<Self, GameError> {
        if cell_size == 0 {
            return Err(GameError::ZeroCellSize);
        }

        let columns = width / cell_size;
        let rows = height / cell_size;
        if columns == 0 || rows == 0 {
            return Err(GameError::EmptyGrid {
                width,
                height,
                cell_size,
            });
        }

        Ok(Self {
            columns: i32::try_from(columns).unwrap_or(i32::MAX),
            rows: i32::try_from(rows).unwrap_or(i32::MAX),
        })
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.columns && cell.y >= 0 && cell.y < self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Cell::new(x, y)))
    }
}
