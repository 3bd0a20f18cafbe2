//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it through `Session::tick`, `Session::set_direction`
//! and `Session::start_new_game`, and draws from `Session::snapshot`.

pub mod config;
pub mod direction;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use food::place_food;
pub use grid::{Cell, Grid};
pub use session::{EndReason, GameOverSignal, Phase, Session, Snapshot, StepResult, TurnResult};
pub use snake::{Segment, Snake};
