//! Terminal front end for the puzzle engine.
//!
//! Rendering is split in two steps: [`GameView`] turns a session snapshot into a
//! [`FrameBuffer`] without touching the terminal, then [`TerminalRenderer`] diffs and flushes
//! that buffer through crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use puzzletris_core as core;
pub use puzzletris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
