//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and instead renders into a simple framebuffer
//! that is flushed to the terminal with diffing.
//!
//! - [`game_view`] is pure: snapshot in, framebuffer out
//! - [`renderer`] owns the terminal and is the only part doing I/O

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_bomber_core as core;
pub use tui_bomber_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Glyph, Rgb, TILE_W};
pub use game_view::{AnchorY, GameView, Screen, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
