//! Leaderboard - in-memory ranked records keyed by player name
//!
//! Persistence is the driver's business: the engine only accepts and hands
//! back a plain list of [`LeaderboardEntry`] values.

use serde::{Deserialize, Serialize};

use crate::types::MAX_NAME_LETTERS;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u32, level: u32) -> Self {
        Self {
            name: name.into(),
            score,
            level,
        }
    }
}

/// Result of merging a submission into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Inserted,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted records, merging duplicate names
    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        let mut board = Self::new();
        for entry in entries {
            board.submit(entry);
        }
        board
    }

    /// Trim and validate a player name
    ///
    /// Returns None for empty names or names longer than [`MAX_NAME_LETTERS`].
    pub fn normalize_name(name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LETTERS {
            return None;
        }
        Some(name.to_string())
    }

    /// Merge a record: an existing name is replaced only by a strictly higher
    /// score or a higher level; unknown names are inserted.
    pub fn submit(&mut self, entry: LeaderboardEntry) -> SubmitOutcome {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                if entry.score > existing.score || entry.level > existing.level {
                    *existing = entry;
                    SubmitOutcome::Updated
                } else {
                    SubmitOutcome::Unchanged
                }
            }
            None => {
                self.entries.push(entry);
                SubmitOutcome::Inserted
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Records in insertion order (the persisted shape)
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Records by score descending, then level ascending, then name
    pub fn ranked(&self) -> Vec<&LeaderboardEntry> {
        let mut ranked: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.level.cmp(&b.level))
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LeaderboardEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_new_name() {
        let mut board = Leaderboard::new();
        assert_eq!(
            board.submit(LeaderboardEntry::new("Ana", 300, 1)),
            SubmitOutcome::Inserted
        );
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_higher_score_replaces() {
        let mut board = Leaderboard::from_entries(vec![LeaderboardEntry::new("Ana", 300, 1)]);
        assert_eq!(
            board.submit(LeaderboardEntry::new("Ana", 500, 2)),
            SubmitOutcome::Updated
        );
        assert_eq!(board.get("Ana"), Some(&LeaderboardEntry::new("Ana", 500, 2)));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_lower_submission_is_ignored() {
        let mut board = Leaderboard::from_entries(vec![LeaderboardEntry::new("Ana", 300, 1)]);
        assert_eq!(
            board.submit(LeaderboardEntry::new("Ana", 100, 1)),
            SubmitOutcome::Unchanged
        );
        assert_eq!(board.get("Ana"), Some(&LeaderboardEntry::new("Ana", 300, 1)));
    }

    #[test]
    fn test_higher_level_alone_replaces() {
        let mut board = Leaderboard::from_entries(vec![LeaderboardEntry::new("Bo", 900, 1)]);
        assert_eq!(
            board.submit(LeaderboardEntry::new("Bo", 200, 2)),
            SubmitOutcome::Updated
        );
        assert_eq!(board.get("Bo").map(|e| e.score), Some(200));
    }

    #[test]
    fn test_equal_submission_is_unchanged() {
        let mut board = Leaderboard::from_entries(vec![LeaderboardEntry::new("Cy", 400, 1)]);
        assert_eq!(
            board.submit(LeaderboardEntry::new("Cy", 400, 1)),
            SubmitOutcome::Unchanged
        );
    }

    #[test]
    fn test_from_entries_merges_duplicates() {
        let board = Leaderboard::from_entries(vec![
            LeaderboardEntry::new("Ana", 300, 1),
            LeaderboardEntry::new("Ana", 800, 2),
            LeaderboardEntry::new("Ana", 100, 1),
        ]);
        assert_eq!(board.entries(), &[LeaderboardEntry::new("Ana", 800, 2)]);
    }

    #[test]
    fn test_ranked_order() {
        let board = Leaderboard::from_entries(vec![
            LeaderboardEntry::new("b", 400, 2),
            LeaderboardEntry::new("c", 900, 1),
            LeaderboardEntry::new("a", 400, 2),
            LeaderboardEntry::new("d", 400, 1),
        ]);
        let names: Vec<&str> = board.ranked().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(Leaderboard::normalize_name("  Ana "), Some("Ana".to_string()));
        assert_eq!(Leaderboard::normalize_name("12345678"), Some("12345678".to_string()));
        assert_eq!(Leaderboard::normalize_name("123456789"), None);
        assert_eq!(Leaderboard::normalize_name("   "), None);
    }
}
