//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and provides the
//! bounded text buffer used to type a leaderboard name.

pub mod map;
pub mod name_entry;

pub use tui_bomber_types as types;

pub use map::{handle_key_event, should_quit};
pub use name_entry::{NameEntry, NameEntryOutcome};
