//! Session configuration
//!
//! Plain values only; reading them from files or the command line happens in the runner.

use std::time::Duration;

use crate::preset::PUZZLE_PRESET;
use crate::types::{
    ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_MS, MAX_BOARD_DIM, MIN_BOARD_HEIGHT,
    MIN_BOARD_WIDTH,
};

/// Board dimensions in cells.
///
/// Both sides are even so the board splits evenly around `x = 0` and `y = 0`, and large
/// enough that every shape spawns inside an empty board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSize {
    width: u8,
    height: u8,
}

impl BoardSize {
    /// Classic 10x20 board.
    pub const CLASSIC: BoardSize = BoardSize {
        width: BOARD_WIDTH,
        height: BOARD_HEIGHT,
    };

    /// Validate a board size. Returns `None` for odd, undersized or oversized sides.
    pub fn new(width: u8, height: u8) -> Option<Self> {
        let ok = |v: u8, min: u8| (min..=MAX_BOARD_DIM).contains(&v) && v % 2 == 0;
        if ok(width, MIN_BOARD_WIDTH) && ok(height, MIN_BOARD_HEIGHT) {
            Some(Self { width, height })
        } else {
            None
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Where the next shape comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Scripted order, consumed front to back.
    pub shapes: Vec<ShapeKind>,
    /// Use `shapes` (true) or uniform random draws (false).
    pub use_sequence: bool,
    /// On exhaustion wrap to the start (true) or repeat the last entry (false).
    pub loop_sequence: bool,
    /// Seed for random draws.
    pub seed: u32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            shapes: vec![
                ShapeKind::P,
                ShapeKind::P,
                ShapeKind::T,
                ShapeKind::L,
                ShapeKind::I,
                ShapeKind::O,
                ShapeKind::P,
            ],
            use_sequence: true,
            loop_sequence: true,
            seed: 1,
        }
    }
}

/// Everything a [`crate::Session`] needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub board: BoardSize,
    /// Interval between gravity steps.
    pub gravity: Duration,
    pub sequence: SequenceConfig,
    /// Rows loaded on start and on every reset, top row first.
    pub preset: Option<Vec<String>>,
}

impl SessionConfig {
    /// Empty board, default sequence and gravity.
    pub fn without_preset() -> Self {
        Self {
            preset: None,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board: BoardSize::CLASSIC,
            gravity: Duration::from_millis(GRAVITY_MS as u64),
            sequence: SequenceConfig::default(),
            preset: Some(PUZZLE_PRESET.iter().map(|row| row.to_string()).collect()),
        }
    }
}
