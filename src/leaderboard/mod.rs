//! Top-score list and its file store.

pub mod board;
pub mod store;

pub use board::{Leaderboard, LeaderboardEntry, MAX_ENTRIES};
pub use store::{LeaderboardStore, DEFAULT_PATH};
