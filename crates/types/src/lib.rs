//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with value semantics, making them usable in any
//! context (engine logic, terminal presentation, persistence).
//!
//! # Board Dimensions
//!
//! The board is described in logical units, including the border ring and one
//! HUD row:
//!
//! - **Units**: 17 x 12
//! - **Playable area**: `x_max = 17 - 2 = 15`, `y_max = 12 - 2 - 1 = 9`
//! - **Spawn corner**: every tile with `x + y <= 3`, the player spawns at (1, 1)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds and are owned by the driver, never by the
//! engine:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOMB_FUSE_MS` | 1750 | Delay between placing and exploding a bomb |
//! | `INVINCIBILITY_MS` | 10000 | Length of the invincibility window |
//! | `ENEMY_TICK_MS` | 1000 | Enemy AI cadence |
//! | `MOVEMENT_SETTLE_MS` | 120 | Headless movement animation length |
//!
//! # Examples
//!
//! ```
//! use tui_bomber_types::{Coordinate, Direction, GameAction};
//!
//! let origin = Coordinate::new(5, 5);
//! assert_eq!(origin.step(Direction::Up, 2), Coordinate::new(5, 3));
//!
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::Move(Direction::Left)));
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in logical units (border ring included)
pub const BOARD_UNITS_X: i32 = 17;

/// Board height in logical units (border ring and HUD row included)
pub const BOARD_UNITS_Y: i32 = 12;

/// Default number of breakable blocks per level
pub const DEFAULT_BREAKABLE_BLOCKS: usize = 20;

/// Default number of enemies per level
pub const DEFAULT_ENEMIES: usize = 3;

/// Default number of coins per level
pub const DEFAULT_COINS: usize = 4;

/// Lives at the start of a match
pub const STARTING_HEALTH: u32 = 3;

/// Bomb range at the start of every level
pub const BASE_BOMB_RANGE: u32 = 1;

/// Points for collecting a coin
pub const POINTS_FOR_COIN: u32 = 400;

/// Points for killing an enemy
pub const POINTS_FOR_ENEMY: u32 = 200;

/// Fuse length of a placed bomb
pub const BOMB_FUSE_MS: u32 = 1750;

/// Length of the invincibility power-up window
pub const INVINCIBILITY_MS: u32 = 10_000;

/// Enemy AI cadence
pub const ENEMY_TICK_MS: u32 = 1000;

/// How long the headless presentation keeps the movement gate closed
pub const MOVEMENT_SETTLE_MS: u32 = 120;

/// Longest accepted leaderboard name
pub const MAX_NAME_LETTERS: usize = 8;

/// Spawn position of the player
pub const SPAWN: Coordinate = Coordinate { x: 1, y: 1 };

/// Immutable 2D integer position with value equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move `distance` tiles in `direction`
    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }

    /// Tiles with `x + y <= 3` form the safe zone around the spawn point
    pub fn in_spawn_corner(self) -> bool {
        self.x + self.y <= 3
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement and blast direction
///
/// `Center` only tags the origin tile of a blast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Center,
}

impl Direction {
    /// The four cardinal directions in rotation order
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Axis-aligned unit delta (y grows downwards)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Center => (0, 0),
        }
    }

    /// Cardinal direction at `index mod 4` in [`Direction::CARDINALS`]
    pub fn from_rotation(index: usize) -> Self {
        Self::CARDINALS[index % 4]
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Center => Direction::Center,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Center => "center",
        }
    }
}

/// Terrain category of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCategory {
    /// Permanent walkable background
    Ground,
    /// Border ring and interior checkerboard, never removed
    FixedWall,
    /// Destructible terrain hiding items and coins
    BreakableBlock,
}

/// Stable handle of a breakable block within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub usize);

/// Stable handle of a coin within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoinId(pub usize);

/// Stable handle of an enemy within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub usize);

/// Logical actions decoded by the input layer
///
/// Only these values cross from the input device into the engine driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the player one tile
    Move(Direction),
    /// Place the single bomb on the player's tile
    PlaceBomb,
    /// Toggle pause state
    Pause,
    /// Start the next level after a victory, or a new match from the menu
    Continue,
    /// Abandon the match and return to the menu
    Quit,
}

impl GameAction {
    /// Parse action from string (for scripted drivers)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_bomber_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("moveUp"), Some(GameAction::Move(Direction::Up)));
    /// assert_eq!(GameAction::from_str("placeBomb"), Some(GameAction::PlaceBomb));
    /// assert_eq!(GameAction::from_str("moveCenter"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::Move(Direction::Up)),
            "movedown" => Some(GameAction::Move(Direction::Down)),
            "moveleft" => Some(GameAction::Move(Direction::Left)),
            "moveright" => Some(GameAction::Move(Direction::Right)),
            "placebomb" => Some(GameAction::PlaceBomb),
            "pause" => Some(GameAction::Pause),
            "continue" => Some(GameAction::Continue),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Move(Direction::Center) => "moveCenter",
            GameAction::PlaceBomb => "placeBomb",
            GameAction::Pause => "pause",
            GameAction::Continue => "continue",
            GameAction::Quit => "quit",
        }
    }
}
