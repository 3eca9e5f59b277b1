//! Grid tests - occupancy, presets and row compaction

use proptest::prelude::*;

use puzzletris::core::{BoardSize, Grid};
use puzzletris::types::TileId;

fn fill_row(grid: &mut Grid, y: i32, tile: TileId) {
    for x in grid.left()..grid.right() {
        grid.set(x, y, Some(tile));
    }
}

#[test]
fn test_sweep_on_empty_grid_is_a_no_op() {
    let mut grid = Grid::default();
    let before = grid.clone();
    assert_eq!(grid.sweep_and_compact(), 0);
    assert_eq!(grid, before);
}

#[test]
fn test_sweep_without_full_rows_keeps_partial_rows() {
    let mut grid = Grid::default();
    fill_row(&mut grid, -10, TileId(1));
    grid.set(4, -10, None);
    grid.set(0, 3, Some(TileId(2)));
    let before = grid.clone();

    assert_eq!(grid.sweep_and_compact(), 0);
    assert_eq!(grid, before);
}

#[test]
fn test_single_full_row() {
    let mut grid = Grid::default();
    let bottom = grid.bottom();
    grid.set(-5, bottom, Some(TileId(1)));
    fill_row(&mut grid, bottom + 1, TileId(2));
    grid.set(2, bottom + 2, Some(TileId(3)));
    grid.set(-1, bottom + 4, Some(TileId(4)));

    assert_eq!(grid.sweep_and_compact(), 1);

    // Below: untouched.
    assert_eq!(grid.get(-5, bottom), Some(Some(TileId(1))));
    // Above: one row lower.
    assert_eq!(grid.get(2, bottom + 1), Some(Some(TileId(3))));
    assert_eq!(grid.get(-1, bottom + 3), Some(Some(TileId(4))));
    assert_eq!(grid.get(-1, bottom + 4), Some(None));
    assert_eq!(grid.occupied_count(), 3);
}

#[test]
fn test_two_separated_full_rows() {
    let mut grid = Grid::default();
    let bottom = grid.bottom();
    for offset in 0..10 {
        grid.set(-5 + offset % 3, bottom + offset, Some(TileId(offset as u8 + 1)));
    }
    fill_row(&mut grid, bottom + 5, TileId(7));
    fill_row(&mut grid, bottom + 7, TileId(7));

    let mut expected: Vec<String> = grid.to_rows();
    // to_rows is top first; drop the two full rows and pad the top.
    let top_index = |y: i32| (grid.top() - 1 - y) as usize;
    expected.remove(top_index(bottom + 5));
    expected.remove(top_index(bottom + 7));
    expected.insert(0, "..........".to_string());
    expected.insert(0, "..........".to_string());

    assert_eq!(grid.sweep_and_compact(), 2);
    assert_eq!(grid.to_rows(), expected);
    // Rows between the gaps keep their order.
    assert_eq!(grid.get(-5 + 6 % 3, bottom + 5), Some(Some(TileId(7))));
    assert_eq!(grid.get(-5 + 8 % 3, bottom + 6), Some(Some(TileId(9))));
}

#[test]
fn test_full_board_clears_everything() {
    let mut grid = Grid::new(BoardSize::new(6, 6).unwrap());
    for y in grid.bottom()..grid.top() {
        fill_row(&mut grid, y, TileId(1));
    }
    assert_eq!(grid.sweep_and_compact(), 6);
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_preset_layout_round_trips_through_rows() {
    let rows = ["......", "#..#..", "......", "##.#.#", "#.....", "######"];
    let mut grid = Grid::new(BoardSize::new(6, 6).unwrap());
    grid.load_preset(&rows, 6, 6);
    assert_eq!(grid.to_rows(), rows.to_vec());
    assert_eq!(grid.get(-3, -2), Some(Some(TileId::OBSTACLE)));
    assert!(grid.is_row_full(-3));
}

#[test]
fn test_commit_then_clear_cells() {
    let mut grid = Grid::default();
    let cells = [(0, 0), (1, 0), (0, 1), (0, 2)];
    assert!(grid.is_valid((3, -2), &cells));
    grid.commit(&cells, (3, -2), TileId(8));
    assert!(!grid.is_valid((3, -2), &cells));
    assert!(grid.is_occupied(4, -2));

    grid.clear_cells(&cells, (3, -2));
    assert!(grid.is_valid((3, -2), &cells));
}

/// One generated row: either forced full or a random pattern.
fn row_strategy(width: usize) -> impl Strategy<Value = Vec<bool>> {
    prop_oneof![
        1 => Just(vec![true; width]),
        3 => prop::collection::vec(any::<bool>(), width),
    ]
}

proptest! {
    #[test]
    fn sweep_matches_removing_full_rows(rows in prop::collection::vec(row_strategy(6), 8)) {
        // rows[0] is the bottom row.
        let mut grid = Grid::new(BoardSize::new(6, 8).unwrap());
        for (r, row) in rows.iter().enumerate() {
            for (c, &filled) in row.iter().enumerate() {
                if filled {
                    grid.set(grid.left() + c as i32, grid.bottom() + r as i32, Some(TileId(r as u8 + 1)));
                }
            }
        }

        let full = rows.iter().filter(|row| row.iter().all(|&f| f)).count();
        let survivors: Vec<(usize, &Vec<bool>)> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.iter().all(|&f| f))
            .collect();

        prop_assert_eq!(grid.sweep_and_compact() as usize, full);

        for y in 0..8usize {
            for c in 0..6usize {
                let expected = survivors
                    .get(y)
                    .filter(|(_, row)| row[c])
                    .map(|(r, _)| TileId(*r as u8 + 1));
                let got = grid.get(grid.left() + c as i32, grid.bottom() + y as i32).unwrap();
                prop_assert_eq!(got, expected, "row {} col {}", y, c);
            }
        }
    }
}
