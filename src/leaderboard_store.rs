//! Leaderboard persistence.
//!
//! The engine only hands over plain record lists; a store turns them into a
//! JSON array of `{name, score, level}` objects and back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::LeaderboardEntry;

pub trait LeaderboardStore {
    fn load(&mut self) -> Result<Vec<LeaderboardEntry>>;
    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<()>;
}

/// Leaderboard kept in a JSON file; a missing file is an empty board
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&mut self) -> Result<Vec<LeaderboardEntry>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).with_context(|| format!("parsing {}", self.path.display()))
    }

    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub entries: Vec<LeaderboardEntry>,
    pub fail_loads: bool,
    pub fail_saves: bool,
    pub saves: usize,
}

impl LeaderboardStore for MemoryStore {
    fn load(&mut self) -> Result<Vec<LeaderboardEntry>> {
        if self.fail_loads {
            bail!("memory store configured to fail loads");
        }
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<()> {
        if self.fail_saves {
            bail!("memory store configured to fail saves");
        }
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}
