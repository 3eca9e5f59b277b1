//! Core types module - shared data structures and constants
//!
//! Plain data shared by the engine, the key map and the terminal view. Nothing here has
//! behaviour beyond parsing and small state transitions, and the crate has no dependencies.
//!
//! # Board Coordinates
//!
//! The board is centred on `x = 0` and `y` grows upwards:
//!
//! - **x**: `-width/2 ..  width/2` (half-open)
//! - **y**: `-height/2 .. height/2` (half-open), row `height/2 - 1` is the ceiling
//!
//! # Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_WIDTH` | 10 | Classic board width |
//! | `BOARD_HEIGHT` | 20 | Classic board height |
//! | `MIN_BOARD_WIDTH` | 6 | Narrowest board the long bar spawns on |
//! | `MIN_BOARD_HEIGHT` | 4 | Shortest board every shape spawns on |
//! | `MAX_BOARD_DIM` | 64 | Largest accepted width or height |
//! | `GRAVITY_MS` | 1000 | Default gravity interval |
//! | `FRAME_MS` | 16 | Runner frame budget (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use puzzletris_types::{Command, Rotation, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::from_str("p"), Some(ShapeKind::P));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Command::from_str("rotateCcw"), Some(Command::RotateCcw));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Narrowest accepted board. The flat long bar spans `x = -1..=2`.
pub const MIN_BOARD_WIDTH: u8 = 6;

/// Shortest accepted board. The tallest shapes span three rows.
pub const MIN_BOARD_HEIGHT: u8 = 4;

/// Largest accepted board width or height.
pub const MAX_BOARD_DIM: u8 = 64;

/// Default gravity interval (one row per second).
pub const GRAVITY_MS: u32 = 1000;

/// Frame budget of the terminal runner (16ms ≈ 60 FPS).
pub const FRAME_MS: u32 = 16;

/// Points for clearing N rows in one lock, N = 0..=4.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row once a single lock clears five rows or more.
pub const EXTENDED_CLEAR_POINTS_PER_LINE: u32 = 200;

/// Integer (x, y) pair: a cell offset, a board position or a kick.
pub type Offset = (i32, i32);

/// Number of cells in every shape.
pub const SHAPE_CELLS: usize = 4;

/// Cell offsets of one shape, relative to its pivot.
pub type ShapeCells = [Offset; SHAPE_CELLS];

/// The eight shapes the engine knows about.
///
/// Seven are the classic tetrominoes; `P` is the puzzle shape, a three-tall column with a
/// cap on its top row, used by scripted scenarios to plug single-cell gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
    P,
}

impl ShapeKind {
    /// Every shape, in catalog order.
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::P,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzletris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("P"), Some(ShapeKind::P));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "p" => Some(ShapeKind::P),
            _ => None,
        }
    }

    /// Uppercase letter used in config files and the side panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::L => "L",
            ShapeKind::J => "J",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::P => "P",
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North** (0): spawn orientation
/// - **East** (1): one clockwise turn
/// - **South** (2): two turns
/// - **West** (3): one counter-clockwise turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use puzzletris_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use puzzletris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Numeric state in `0..4`.
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any integer, wrapped into `0..4`.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Discrete, edge-triggered commands accepted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; lands it when blocked
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use puzzletris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("softdrop"), Some(Command::SoftDrop));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
        }
    }
}

/// Opaque visual tile carried by an occupied cell.
///
/// The engine never interprets it; renderers map it to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u8);

impl TileId {
    /// Tile used for cells loaded from a preset board.
    pub const OBSTACLE: TileId = TileId(0);
}

/// A cell on the board: `None` when empty, otherwise the tile that locked it.
pub type Tile = Option<TileId>;
