//! Render query surface
//!
//! A [`SessionSnapshot`] is a plain copy of everything a view needs. It can be refilled in
//! place with [`crate::Session::snapshot_into`] so a frame loop keeps one buffer alive.

use crate::piece::ActivePiece;
use crate::types::{Offset, Rotation, ShapeCells, ShapeKind, Tile, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub tile: TileId,
    pub rotation: Rotation,
    /// Pivot-relative offsets.
    pub cells: ShapeCells,
    pub position: Offset,
}

impl ActiveSnapshot {
    pub fn board_cells(&self) -> [Offset; 4] {
        let (px, py) = self.position;
        self.cells.map(|(x, y)| (px + x, py + y))
    }
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(piece: &ActivePiece) -> Self {
        Self {
            kind: piece.kind(),
            tile: piece.tile(),
            rotation: piece.rotation(),
            cells: *piece.cells(),
            position: piece.position(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub width: u8,
    pub height: u8,
    /// Locked cells, row-major with the bottom row first.
    pub tiles: Vec<Tile>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub started: bool,
    pub game_over: bool,
}

impl SessionSnapshot {
    /// Locked tile at board coordinate `(x, y)`. `None` when out of bounds.
    pub fn tile_at(&self, x: i32, y: i32) -> Option<Tile> {
        let (w, h) = (self.width as i32, self.height as i32);
        let col = x + w / 2;
        let row = y + h / 2;
        if col < 0 || col >= w || row < 0 || row >= h {
            return None;
        }
        self.tiles.get((row * w + col) as usize).copied()
    }

    /// Tile to draw at `(x, y)`: the active piece first, then the locked cell.
    pub fn visible_tile(&self, x: i32, y: i32) -> Tile {
        if let Some(active) = &self.active {
            if active.board_cells().contains(&(x, y)) {
                return Some(active.tile);
            }
        }
        self.tile_at(x, y).flatten()
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SessionSnapshot {
        let mut tiles = vec![None; 4 * 2];
        tiles[0] = Some(TileId(1)); // (-2, -1)
        tiles[7] = Some(TileId(2)); // (1, 0)
        SessionSnapshot {
            width: 4,
            height: 2,
            tiles,
            ..SessionSnapshot::default()
        }
    }

    #[test]
    fn tile_lookup_uses_board_coordinates() {
        let snap = snapshot();
        assert_eq!(snap.tile_at(-2, -1), Some(Some(TileId(1))));
        assert_eq!(snap.tile_at(1, 0), Some(Some(TileId(2))));
        assert_eq!(snap.tile_at(0, 0), Some(None));
        assert_eq!(snap.tile_at(2, 0), None);
        assert_eq!(snap.tile_at(0, -2), None);
    }

    #[test]
    fn active_piece_draws_over_locked_cells() {
        let mut snap = snapshot();
        snap.active = Some(ActiveSnapshot {
            kind: ShapeKind::O,
            tile: TileId(5),
            rotation: Rotation::North,
            cells: [(0, 0), (1, 0), (0, 1), (1, 1)],
            position: (-2, -1),
        });
        assert_eq!(snap.visible_tile(-2, -1), Some(TileId(5)));
        assert_eq!(snap.visible_tile(1, 0), Some(TileId(2)));
        assert_eq!(snap.visible_tile(0, 0), None);
    }
}
