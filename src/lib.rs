//! TUI Bomber (workspace facade crate).
//!
//! Re-exports the member crates under `tui_bomber::{core,input,term,types}` and
//! hosts the driver pieces that need I/O: environment config, leaderboard
//! persistence, the JSON-lines event log and the [`Session`] that owns timers.

pub mod config;
pub mod event_log;
pub mod leaderboard_store;
pub mod session;

pub use tui_bomber_core as core;
pub use tui_bomber_input as input;
pub use tui_bomber_term as term;
pub use tui_bomber_types as types;

pub use config::Config;
pub use event_log::EventLog;
pub use leaderboard_store::{JsonFileStore, LeaderboardStore, MemoryStore};
pub use session::Session;
