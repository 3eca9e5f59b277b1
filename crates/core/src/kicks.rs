//! SRS wall kick tables
//!
//! Offsets use the board convention (`y` up). Each row lists the five positions tried, in
//! order, after a rotation; the first entry is always "rotate in place".
//! Reference: https://tetris.wiki/Super_Rotation_System

use crate::catalog::KickClass;
use crate::types::{Offset, Rotation};

/// Number of kick candidates tried per rotation.
pub const KICK_ATTEMPTS: usize = 5;

/// Eight transition rows of five kicks each.
pub type KickTable = [[Offset; KICK_ATTEMPTS]; 8];

/// JLSTZ (and P) kick table.
const STANDARD_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I piece kick table.
const LONG_BAR_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Table row for a single-step transition, `None` for pairs a ±1 turn never produces.
pub fn transition_row(from: Rotation, to: Rotation) -> Option<usize> {
    use Rotation::*;
    match (from, to) {
        (North, East) => Some(0),
        (East, North) => Some(1),
        (East, South) => Some(2),
        (South, East) => Some(3),
        (South, West) => Some(4),
        (West, South) => Some(5),
        (West, North) => Some(6),
        (North, West) => Some(7),
        _ => None,
    }
}

/// Kick offset for one rotation attempt.
///
/// Squares always get `(0, 0)`. An unreachable `(from, to)` pair reads row 0. Attempts past
/// the last candidate also return `(0, 0)`.
pub fn kick_offset(class: KickClass, from: Rotation, to: Rotation, attempt: usize) -> Offset {
    let table = match class {
        KickClass::Square => return (0, 0),
        KickClass::LongBar => &LONG_BAR_KICKS,
        KickClass::Standard => &STANDARD_KICKS,
    };

    let row = transition_row(from, to).unwrap_or_else(|| {
        tracing::warn!(?from, ?to, "kick lookup for a non-adjacent rotation pair");
        0
    });

    table[row].get(attempt).copied().unwrap_or((0, 0))
}
