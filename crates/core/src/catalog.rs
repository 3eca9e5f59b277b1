//! Shape catalog - static cell offsets, tiles and kick classes
//!
//! Offsets are relative to the piece pivot with `y` growing upwards. Spawning in
//! [`crate::piece`] places the tallest cell on the top row.

use crate::types::{Offset, ShapeCells, ShapeKind, TileId};

/// Which kick table a shape rotates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KickClass {
    /// The four-long bar (I).
    LongBar,
    /// Every other rotatable shape (J, L, S, T, Z, P).
    Standard,
    /// The square: no kicks, rotates in place.
    Square,
}

/// Immutable description of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub kind: ShapeKind,
    pub cells: ShapeCells,
    pub tile: TileId,
}

static CATALOG: [ShapeDefinition; 8] = [
    ShapeDefinition {
        kind: ShapeKind::I,
        cells: [(-1, 1), (0, 1), (1, 1), (2, 1)],
        tile: TileId(1),
    },
    ShapeDefinition {
        kind: ShapeKind::O,
        cells: [(0, 1), (1, 1), (0, 0), (1, 0)],
        tile: TileId(2),
    },
    ShapeDefinition {
        kind: ShapeKind::T,
        cells: [(0, 1), (-1, 0), (0, 0), (1, 0)],
        tile: TileId(3),
    },
    ShapeDefinition {
        kind: ShapeKind::L,
        cells: [(1, 1), (-1, 0), (0, 0), (1, 0)],
        tile: TileId(4),
    },
    ShapeDefinition {
        kind: ShapeKind::J,
        cells: [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        tile: TileId(5),
    },
    ShapeDefinition {
        kind: ShapeKind::S,
        cells: [(0, 1), (1, 1), (-1, 0), (0, 0)],
        tile: TileId(6),
    },
    ShapeDefinition {
        kind: ShapeKind::Z,
        cells: [(-1, 1), (0, 1), (0, 0), (1, 0)],
        tile: TileId(7),
    },
    // Single-cell stem at the pivot, two cells above it, cap to the right on top.
    ShapeDefinition {
        kind: ShapeKind::P,
        cells: [(0, 0), (0, 1), (0, 2), (1, 2)],
        tile: TileId(8),
    },
];

/// Look up the definition of a shape.
pub fn definition(kind: ShapeKind) -> &'static ShapeDefinition {
    let idx = match kind {
        ShapeKind::I => 0,
        ShapeKind::O => 1,
        ShapeKind::T => 2,
        ShapeKind::L => 3,
        ShapeKind::J => 4,
        ShapeKind::S => 5,
        ShapeKind::Z => 6,
        ShapeKind::P => 7,
    };
    &CATALOG[idx]
}

/// Kick class used when rotating `kind`.
pub fn kick_class(kind: ShapeKind) -> KickClass {
    match kind {
        ShapeKind::I => KickClass::LongBar,
        ShapeKind::O => KickClass::Square,
        _ => KickClass::Standard,
    }
}

/// Tallest local `y` among `cells`.
pub fn max_cell_y(cells: &[Offset]) -> i32 {
    cells.iter().map(|&(_, y)| y).max().unwrap_or(0)
}
