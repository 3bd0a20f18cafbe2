//! Leaderboard persistence as a JSON list of entries.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::board::{Leaderboard, LeaderboardEntry};

/// Default leaderboard file, relative to the working directory
pub const DEFAULT_PATH: &str = "leaderboard.json";

/// A leaderboard file on disk
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
    capacity: usize,
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the board; a missing file is an empty board
    pub fn load(&self) -> Result<Leaderboard> {
        if !self.path.exists() {
            tracing::info!(path = ?self.path, "no leaderboard file, starting empty");
            return Ok(Leaderboard::new(self.capacity));
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read leaderboard from {:?}", self.path))?;
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse leaderboard from {:?}", self.path))?;

        let board = Leaderboard::from_entries(entries, self.capacity);
        tracing::info!(path = ?self.path, entries = board.len(), "leaderboard loaded");
        Ok(board)
    }

    /// Write the board, creating parent directories if needed
    pub fn save(&self, board: &Leaderboard) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(board.entries())
            .context("Failed to serialize leaderboard")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write leaderboard to {:?}", self.path))?;

        tracing::info!(path = ?self.path, entries = board.len(), "leaderboard saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::MAX_ENTRIES;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = LeaderboardStore::new(dir.path().join("scores.json"), MAX_ENTRIES);

        let board = store.load().unwrap();
        assert!(board.is_empty());
        assert_eq!(board.capacity(), MAX_ENTRIES);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = LeaderboardStore::new(dir.path().join("nested/scores.json"), MAX_ENTRIES);

        let mut board = Leaderboard::new(MAX_ENTRIES);
        board.submit("ana", 12);
        board.submit("bo", 30);
        store.save(&board).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, board);
        assert_eq!(loaded.entries()[0].name, "bo");
    }

    #[test]
    fn test_load_sorts_and_caps_file_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        let entries: Vec<LeaderboardEntry> = (1..=7)
            .map(|i| LeaderboardEntry::new(format!("p{i}"), i * 10))
            .collect();
        std::fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();

        let board = LeaderboardStore::new(&path, MAX_ENTRIES).load().unwrap();
        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![70, 60, 50, 40, 30]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(LeaderboardStore::new(&path, MAX_ENTRIES).load().is_err());
    }
}
