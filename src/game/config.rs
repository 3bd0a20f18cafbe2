use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use crate::error::GameError;

/// Configuration for the game
///
/// Any field missing from a config file falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the play area in pixels
    pub area_width: u32,
    /// Height of the play area in pixels
    pub area_height: u32,
    /// Edge length of one square cell in pixels
    pub cell_size: u32,

    /// Head cell of a fresh snake
    pub start_cell: Cell,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Speed
    /// Tick interval at the start of a game, in milliseconds
    pub start_interval_ms: u64,
    /// Fastest allowed tick interval, in milliseconds
    pub min_interval_ms: u64,
    /// Interval reduction per point scored, in milliseconds
    pub interval_step_ms: u64,

    /// Number of entries kept on the leaderboard
    pub leaderboard_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            area_width: 400,
            area_height: 400,
            cell_size: 20,
            start_cell: Cell::new(5, 5),
            initial_snake_length: 3,
            start_interval_ms: 400,
            min_interval_ms: 100,
            interval_step_ms: 2,
            leaderboard_capacity: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom play area in pixels
    pub fn new(area_width: u32, area_height: u32) -> Self {
        Self {
            area_width,
            area_height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing (10x10 cells)
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Grid geometry of the configured play area
    pub fn grid(&self) -> Result<Grid, GameError> {
        Grid::from_pixels(self.area_width, self.area_height, self.cell_size)
    }

    /// Check that the grid is non-empty and a fresh snake fits on it with
    /// at least one cell to spare for food
    ///
    /// A fresh snake heads right, so its body runs left from `start_cell`.
    pub fn validate(&self) -> Result<Grid, GameError> {
        let grid = self.grid()?;

        let length = self.initial_snake_length;
        let fits = length > 0
            && length < grid.cell_count()
            && grid.contains(self.start_cell)
            && i32::try_from(length - 1)
                .ok()
                .and_then(|behind| self.start_cell.x.checked_sub(behind))
                .is_some_and(|tail_x| grid.contains(Cell::new(tail_x, self.start_cell.y)));

        if !fits {
            return Err(GameError::SnakeDoesNotFit {
                head: self.start_cell,
                length,
                columns: grid.columns(),
                rows: grid.rows(),
            });
        }

        Ok(grid)
    }

    pub fn start_interval(&self) -> Duration {
        Duration::from_millis(self.start_interval_ms.max(self.min_interval_ms))
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Interval after one more point: one step faster, never below the minimum
    pub fn next_interval(&self, current: Duration) -> Duration {
        current
            .saturating_sub(Duration::from_millis(self.interval_step_ms))
            .max(self.min_interval())
    }
}
