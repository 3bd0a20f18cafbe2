use serde::{Deserialize, Serialize};

/// Default number of entries kept on the board
pub const MAX_ENTRIES: usize = 5;

/// Name shown for a submission with a blank name
pub const ANONYMOUS: &str = "Anonymous";

/// One line of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Top scores, sorted descending and capped at `capacity` entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    capacity: usize,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a board from entries in any order; extras beyond `capacity`
    /// are dropped from the bottom. Equal scores keep their given order.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>, capacity: usize) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn lowest_score(&self) -> Option<u32> {
        self.entries.last().map(|entry| entry.score)
    }

    /// Whether a finished game with `score` earns a place on the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 || self.capacity == 0 {
            return false;
        }
        !self.is_full() || self.lowest_score().is_some_and(|lowest| score > lowest)
    }

    /// Insert an entry below every existing entry with an equal or higher
    /// score, then drop whatever falls off the bottom.
    ///
    /// Returns the rank (0-based) the entry landed on, or `None` if it did
    /// not make the cut.
    pub fn submit(&mut self, name: &str, score: u32) -> Option<usize> {
        let name = name.trim();
        let name = if name.is_empty() { ANONYMOUS } else { name };

        let rank = self
            .entries
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(self.entries.len());

        if rank >= self.capacity {
            return None;
        }

        self.entries.insert(rank, LeaderboardEntry::new(name, score));
        self.entries.truncate(self.capacity);
        Some(rank)
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(MAX_ENTRIES)
    }
}
