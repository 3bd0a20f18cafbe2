//! Classic Snake - a terminal Snake game with a persisted leaderboard
//!
//! This library provides:
//! - Core game logic: grid, snake, food and the session state machine (game module)
//! - Top-score list and its JSON file store (leaderboard module)
//! - Key mapping (input module) and TUI rendering (render module)
//! - The interactive terminal front end (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod modes;
pub mod render;

pub use error::GameError;
