//! Active piece - the falling shape and its Grid-checked moves and rotations

use crate::catalog::{self, max_cell_y};
use crate::grid::Grid;
use crate::kicks::{kick_offset, KICK_ATTEMPTS};
use crate::types::{Offset, Rotation, ShapeCells, ShapeKind, TileId};

/// Direction of a one-cell move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    pub fn delta(self) -> Offset {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Down => (0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Result of [`ActivePiece::attempt_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// A blocked sideways move. Nothing changes.
    Rejected,
    /// A blocked downward move: the piece has come to rest.
    Landed,
}

/// The shape currently under player control.
///
/// `cells` are pivot-relative and kept apart from `position`; board coordinates are their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: ShapeKind,
    tile: TileId,
    cells: ShapeCells,
    position: Offset,
    rotation: Rotation,
}

impl ActivePiece {
    /// Place a fresh `kind` so its tallest cell sits on the top row.
    ///
    /// Returns `None` when that placement collides with the grid.
    pub fn spawn(kind: ShapeKind, grid: &Grid) -> Option<Self> {
        let def = catalog::definition(kind);
        let position = (0, (grid.top() - 1) - max_cell_y(&def.cells));

        if !grid.is_valid(position, &def.cells) {
            return None;
        }

        Some(Self {
            kind,
            tile: def.tile,
            cells: def.cells,
            position,
            rotation: Rotation::North,
        })
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn tile(&self) -> TileId {
        self.tile
    }

    pub fn cells(&self) -> &ShapeCells {
        &self.cells
    }

    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Cells in board coordinates.
    pub fn board_cells(&self) -> [Offset; 4] {
        let (px, py) = self.position;
        self.cells.map(|(x, y)| (px + x, py + y))
    }

    /// Shift one cell in `direction` if the grid allows it.
    pub fn attempt_move(&mut self, direction: MoveDirection, grid: &Grid) -> MoveOutcome {
        let (dx, dy) = direction.delta();
        let target = (self.position.0 + dx, self.position.1 + dy);

        if grid.is_valid(target, &self.cells) {
            self.position = target;
            return MoveOutcome::Moved;
        }

        match direction {
            MoveDirection::Down => MoveOutcome::Landed,
            MoveDirection::Left | MoveDirection::Right => MoveOutcome::Rejected,
        }
    }

    /// Rotate a quarter turn, trying each kick offset in order.
    ///
    /// Returns false and leaves the piece untouched if every candidate collides.
    pub fn attempt_rotate(&mut self, direction: RotateDirection, grid: &Grid) -> bool {
        let target = match direction {
            RotateDirection::Clockwise => self.rotation.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotation.rotate_ccw(),
        };

        let class = catalog::kick_class(self.kind);
        let candidate = match class {
            catalog::KickClass::Square => self.cells,
            _ => rotate_cells(&self.cells, direction),
        };

        for attempt in 0..KICK_ATTEMPTS {
            let (kx, ky) = kick_offset(class, self.rotation, target, attempt);
            let position = (self.position.0 + kx, self.position.1 + ky);

            if grid.is_valid(position, &candidate) {
                self.cells = candidate;
                self.position = position;
                self.rotation = target;
                return true;
            }
        }

        false
    }
}

/// Quarter-turn every offset about the pivot.
pub fn rotate_cells(cells: &ShapeCells, direction: RotateDirection) -> ShapeCells {
    cells.map(|(x, y)| match direction {
        RotateDirection::Clockwise => (y, -x),
        RotateDirection::CounterClockwise => (-y, x),
    })
}
