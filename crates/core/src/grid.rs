//! Grid module - occupancy store for locked cells
//!
//! The grid is centred on the origin: `x` spans `[-width/2, width/2)` and `y` spans
//! `[-height/2, height/2)` with `y` growing upwards. Storage is a flat row-major vector
//! starting at the bottom row, so shifting rows down is one `copy_within`.

use std::fmt;

use arrayvec::ArrayVec;

use crate::config::BoardSize;
use crate::preset::PRESET_MARKER;
use crate::types::{Offset, Tile, TileId, MAX_BOARD_DIM};

/// Rows cleared by a single sweep, bottom to top.
pub type ClearedRows = ArrayVec<i32, { MAX_BOARD_DIM as usize }>;

/// Locked-cell occupancy for one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: BoardSize,
    /// Row-major, bottom row first: `(y - bottom) * width + (x - left)`
    cells: Vec<Tile>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(size: BoardSize) -> Self {
        let len = size.width() as usize * size.height() as usize;
        Self {
            size,
            cells: vec![None; len],
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.size.height() as i32
    }

    /// First valid column.
    pub fn left(&self) -> i32 {
        -(self.width() / 2)
    }

    /// One past the last valid column.
    pub fn right(&self) -> i32 {
        self.width() / 2
    }

    /// Lowest valid row.
    pub fn bottom(&self) -> i32 {
        -(self.height() / 2)
    }

    /// One past the highest valid row.
    pub fn top(&self) -> i32 {
        self.height() / 2
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let col = (x - self.left()) as usize;
        let row = (y - self.bottom()) as usize;
        Some(row * self.width() as usize + col)
    }

    #[inline(always)]
    fn row_start(&self, y: i32) -> usize {
        (y - self.bottom()) as usize * self.width() as usize
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.bottom() && y < self.top()
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(x, y)`. Returns false when out of bounds.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = tile;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True when every `position + cell` is inside the board and empty.
    pub fn is_valid(&self, position: Offset, cells: &[Offset]) -> bool {
        let (px, py) = position;
        cells
            .iter()
            .all(|&(dx, dy)| matches!(self.get(px + dx, py + dy), Some(None)))
    }

    /// Mark every `position + cell` with `tile`. The caller validates first.
    pub fn commit(&mut self, cells: &[Offset], position: Offset, tile: TileId) {
        let (px, py) = position;
        for &(dx, dy) in cells {
            self.set(px + dx, py + dy, Some(tile));
        }
    }

    /// Empty every `position + cell`.
    pub fn clear_cells(&mut self, cells: &[Offset], position: Offset) {
        let (px, py) = position;
        for &(dx, dy) in cells {
            self.set(px + dx, py + dy, None);
        }
    }

    /// Replace all occupancy with a text layout, top row first.
    ///
    /// Row `r`, column `c` maps to `x = -width/2 + c`, `y = (height/2 - 1) - r`. Extra rows and
    /// columns are dropped, empty rows are skipped, and an empty layout leaves the grid alone.
    pub fn load_preset<S: AsRef<str>>(&mut self, rows: &[S], width: u8, height: u8) {
        if rows.is_empty() {
            return;
        }

        self.clear();

        let width = width as i32;
        let height = height as i32;

        for (r, row) in rows.iter().take(height as usize).enumerate() {
            let row = row.as_ref();
            if row.is_empty() {
                continue;
            }

            let y = (height / 2 - 1) - r as i32;
            for (c, ch) in row.chars().take(width as usize).enumerate() {
                if ch != PRESET_MARKER {
                    continue;
                }
                let x = -(width / 2) + c as i32;
                self.set(x, y, Some(TileId::OBSTACLE));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < self.bottom() || y >= self.top() {
            return false;
        }
        let start = self.row_start(y);
        self.cells[start..start + self.width() as usize]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Full rows, bottom to top.
    pub fn full_rows(&self) -> ClearedRows {
        (self.bottom()..self.top())
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Clear every full row and drop the rows above into the gaps.
    ///
    /// Returns how many rows were removed. With no full rows the grid is untouched.
    pub fn sweep_and_compact(&mut self) -> u32 {
        let cleared = self.full_rows();
        if cleared.is_empty() {
            return 0;
        }

        let width = self.width() as usize;
        for &y in &cleared {
            let start = self.row_start(y);
            self.cells[start..start + width].fill(None);
        }

        // Each earlier (lower) removal has already pulled this row down by one.
        for (shifted, &y) in cleared.iter().enumerate() {
            let row = y - shifted as i32;
            self.collapse_onto(row);
        }

        tracing::debug!(rows = ?cleared.as_slice(), "rows cleared");
        cleared.len() as u32
    }

    /// Move every row above `y` down by one and empty the top row.
    fn collapse_onto(&mut self, y: i32) {
        let width = self.width() as usize;
        let dst = self.row_start(y);
        let src = dst + width;
        let end = self.cells.len();

        self.cells.copy_within(src..end, dst);
        self.cells[end - width..].fill(None);
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Occupied cells as `((x, y), tile)`, bottom row first.
    pub fn occupied(&self) -> impl Iterator<Item = (Offset, TileId)> + '_ {
        let width = self.width();
        let (left, bottom) = (self.left(), self.bottom());
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            let idx = idx as i32;
            cell.map(|tile| ((left + idx % width, bottom + idx / width), tile))
        })
    }

    /// Raw storage, bottom row first.
    pub fn tiles(&self) -> &[Tile] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Text rows in the preset format, top row first.
    pub fn to_rows(&self) -> Vec<String> {
        (self.bottom()..self.top())
            .rev()
            .map(|y| {
                (self.left()..self.right())
                    .map(|x| if self.is_occupied(x, y) { PRESET_MARKER } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(BoardSize::CLASSIC)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
