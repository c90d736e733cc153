use crate::game::direction::Direction;
use crate::game::grid::{Grid, Row, GRID_SIZE};

/// Compacts a row to the left and merges equal neighbours.
///
/// Each tile merges at most once per call, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`. Returns the new row and the sum of the merged values.
pub fn merge_row_left(row: Row) -> (Row, u32) {
    let tiles: Vec<u32> = row.iter().copied().filter(|v| *v != 0).collect();
    let mut merged = [0; GRID_SIZE];
    let mut gained = 0;
    let mut out = 0;
    let mut i = 0;

    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let value = tiles[i] * 2;
            merged[out] = value;
            gained += value;
            i += 2;
        } else {
            merged[out] = tiles[i];
            i += 1;
        }
        out += 1;
    }

    (merged, gained)
}

/// Applies [`merge_row_left`] to every row independently.
pub fn slide_left(grid: &Grid) -> (Grid, u32) {
    let mut result = *grid;
    let mut gained = 0;
    for row in result.cells.iter_mut() {
        let (merged, score) = merge_row_left(*row);
        *row = merged;
        gained += score;
    }
    (result, gained)
}

/// Slides the whole grid in `direction`.
///
/// Every direction is reduced to a left slide: the grid is mapped into the
/// left orientation, slid, then mapped back.
pub fn slide(grid: &Grid, direction: Direction) -> (Grid, u32) {
    match direction {
        Direction::Left => slide_left(grid),
        Direction::Right => {
            let (slid, gained) = slide_left(&grid.mirrored());
            (slid.mirrored(), gained)
        }
        Direction::Up => {
            let (slid, gained) = slide_left(&grid.transposed());
            (slid.transposed(), gained)
        }
        Direction::Down => {
            let (slid, gained) = slide_left(&grid.transposed().mirrored());
            (slid.mirrored().transposed(), gained)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_without_gaps_or_pairs_is_unchanged() {
        let row = [2, 4, 8, 16];
        assert_eq!(merge_row_left(row), (row, 0));
    }

    #[test]
    fn test_two_pairs_merge_once_each() {
        assert_eq!(merge_row_left([2, 2, 4, 4]), ([4, 8, 0, 0], 12));
    }

    #[test]
    fn test_no_cascade_merge() {
        assert_eq!(merge_row_left([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
    }

    #[test]
    fn test_gaps_are_compacted_before_merging() {
        assert_eq!(merge_row_left([2, 0, 0, 2]), ([4, 0, 0, 0], 4));
        assert_eq!(merge_row_left([0, 4, 0, 8]), ([4, 8, 0, 0], 0));
    }

    #[test]
    fn test_odd_run_merges_leading_pair() {
        assert_eq!(merge_row_left([4, 4, 4, 0]), ([8, 4, 0, 0], 8));
        assert_eq!(merge_row_left([8, 4, 4, 4]), ([8, 8, 4, 0], 8));
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        assert_eq!(merge_row_left([4, 2, 2, 0]), ([4, 4, 0, 0], 4));
    }

    #[test]
    fn test_slide_right_merges_toward_right_edge() {
        let grid = Grid::from_rows([
            [2, 2, 2, 0],
            [0, 0, 0, 0],
            [4, 0, 4, 8],
            [0, 0, 0, 0],
        ]);
        let (slid, gained) = slide(&grid, Direction::Right);
        assert_eq!(slid.cells[0], [0, 0, 2, 4]);
        assert_eq!(slid.cells[2], [0, 0, 8, 8]);
        assert_eq!(gained, 12);
    }

    #[test]
    fn test_slide_down_merges_toward_bottom() {
        let grid = Grid::from_rows([
            [2, 0, 0, 0],
            [2, 0, 0, 0],
            [2, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let (slid, gained) = slide(&grid, Direction::Down);
        assert_eq!(
            slid,
            Grid::from_rows([[0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0]])
        );
        assert_eq!(gained, 4);
    }

    fn representative_grids() -> Vec<Grid> {
        vec![
            Grid::from_rows([[2, 2, 4, 4], [0, 2, 0, 2], [8, 8, 8, 8], [16, 0, 0, 16]]),
            Grid::from_rows([[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0]]),
            Grid::from_rows([[2, 4, 8, 16], [4, 8, 16, 32], [8, 16, 32, 64], [16, 32, 64, 128]]),
            Grid::from_rows([[0, 0, 0, 0], [0, 4, 4, 0], [0, 4, 4, 0], [0, 0, 0, 0]]),
            Grid::from_rows([[2, 4, 2, 4], [2, 4, 2, 4], [8, 8, 16, 16], [0, 2, 0, 2]]),
        ]
    }

    /// Rotates 90 degrees clockwise.
    fn rotate_cw(grid: &Grid) -> Grid {
        grid.transposed().mirrored()
    }

    fn rotate_ccw(grid: &Grid) -> Grid {
        grid.mirrored().transposed()
    }

    #[test]
    fn test_up_is_left_under_rotation() {
        for grid in representative_grids() {
            // Counter-clockwise rotation brings the top edge to the left.
            let (slid, gained) = slide_left(&rotate_ccw(&grid));
            assert_eq!(slide(&grid, Direction::Up), (rotate_cw(&slid), gained));
        }
    }

    #[test]
    fn test_down_is_left_under_rotation() {
        for grid in representative_grids() {
            let (slid, gained) = slide_left(&rotate_cw(&grid));
            assert_eq!(slide(&grid, Direction::Down), (rotate_ccw(&slid), gained));
        }
    }

    #[test]
    fn test_right_is_left_under_half_turn() {
        for grid in representative_grids() {
            let half_turn = |g: &Grid| rotate_cw(&rotate_cw(g));
            let (slid, gained) = slide_left(&half_turn(&grid));
            assert_eq!(slide(&grid, Direction::Right), (half_turn(&slid), gained));
        }
    }
}
