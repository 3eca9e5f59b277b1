//! Built-in puzzle start board.
//!
//! `#` is an occupied cell, `.` is empty, rows run top to bottom on a 10x20 board.

/// Occupied-cell marker in preset rows.
pub const PRESET_MARKER: char = '#';

/// The default start-of-game puzzle layout.
pub const PUZZLE_PRESET: [&str; 20] = [
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..########",
    "..########",
    ".#########",
    "#######...",
    "########..",
    "...#######",
    "#.########",
    "#######..#",
    "########.#",
    "########.#",
    "....######",
    "########..",
    "########..",
    "#####...##",
    "######..##",
];
