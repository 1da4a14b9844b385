//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const ENV_SEED: &str = "BOMBER_SEED";
pub const ENV_LEADERBOARD_PATH: &str = "BOMBER_LEADERBOARD_PATH";
pub const ENV_EVENT_LOG: &str = "BOMBER_EVENT_LOG";

const LEADERBOARD_FILE: &str = ".tui-bomber-leaderboard.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed for level generation and enemy AI
    pub seed: u32,
    /// JSON file holding the leaderboard
    pub leaderboard_path: PathBuf,
    /// Append every emitted event here as one JSON line
    pub event_log_path: Option<PathBuf>,
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty(ENV_SEED)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let leaderboard_path = non_empty(ENV_LEADERBOARD_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| match non_empty("HOME") {
                Some(home) => PathBuf::from(home).join(LEADERBOARD_FILE),
                None => PathBuf::from(LEADERBOARD_FILE),
            });

        let event_log_path = non_empty(ENV_EVENT_LOG).map(PathBuf::from);

        Self {
            seed,
            leaderboard_path,
            event_log_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
