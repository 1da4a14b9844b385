//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of a grid-based bomb game: level generation,
//! movement, bomb blasts, enemy AI, scoring and the leaderboard. It has no
//! dependency on a terminal, a clock or the filesystem, which makes it:
//!
//! - **Deterministic**: the same seed and the same call sequence produce the
//!   same level layouts, enemy moves and event batches
//! - **Testable**: scripted layouts can be loaded directly
//! - **Portable**: the driver can be a terminal UI, a test or a replay tool
//!
//! # Module Structure
//!
//! - [`grid`]: terrain of the playfield plus its border ring
//! - [`generator`]: level layout generation and its validation
//! - [`blast`]: cross-shaped blast path resolution
//! - [`game_state`]: the engine, owning every entity of a match
//! - [`events`]: the closed set of change notifications and their sinks
//! - [`snapshot`]: read-only level views
//! - [`leaderboard`]: ranked best records keyed by name
//! - [`timers`]: the fuse, invincibility, enemy and movement timers
//! - [`rng`]: seeded LCG and pool sampling
//!
//! # Example
//!
//! ```
//! use tui_bomber_core::{GameEvent, GameState, Phase};
//! use tui_bomber_types::Direction;
//!
//! let mut game = GameState::new(12345);
//! game.start_level(1).unwrap();
//! assert_eq!(game.phase(), Phase::LevelActive);
//!
//! // A freshly loaded level always reports its full layout first
//! let first = game.drain_events().next();
//! assert!(matches!(first, Some(GameEvent::LevelLoaded(_))));
//!
//! // The spawn corner is never blocked in the direction of (2, 1) or (1, 2)
//! let moved = game.move_player(Direction::Right) || game.move_player(Direction::Down);
//! assert!(moved);
//! ```
//!
//! # Timing
//!
//! The engine owns no clock. A driver keeps a [`Scheduler`] and calls:
//! - [`GameState::explode_bomb`] when the 1750ms fuse fires
//! - [`GameState::expire_invincibility`] 10s after the power-up
//! - [`GameState::move_enemies`] every 1000ms while the level runs
//! - [`GameState::finish_movement_settle`] when a move animation ends

pub mod blast;
pub mod events;
pub mod game_state;
pub mod generator;
pub mod grid;
pub mod leaderboard;
pub mod rng;
pub mod snapshot;
pub mod timers;

pub use tui_bomber_types as types;

// Re-export commonly used types for convenience
pub use blast::{resolve, BlastTile};
pub use events::{Actor, EventSink, FnSink, GameEvent};
pub use game_state::{Enemy, GameState, Phase, Player};
pub use generator::{generate, EnemySpawn, GenerationError, LevelConfig, LevelLayout};
pub use grid::Grid;
pub use leaderboard::{Leaderboard, LeaderboardEntry, SubmitOutcome};
pub use rng::{PoolSampling, SimpleRng};
pub use snapshot::{EnemySnapshot, LevelSnapshot, PlayerSnapshot};
pub use timers::{Scheduler, TimerKind};
