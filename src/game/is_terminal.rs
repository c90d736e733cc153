use crate::game::grid::{Grid, GRID_SIZE};

/// True when the grid is full and no two orthogonal neighbours are equal.
///
/// This is a fullness/adjacency test only; callers run it right after a
/// spawn that followed a moving slide.
pub fn is_terminal(grid: &Grid) -> bool {
    if grid.count_empty() > 0 {
        return false;
    }
    for i in 0..GRID_SIZE {
        for j in 0..GRID_SIZE {
            let value = grid.get(i, j);
            if j + 1 < GRID_SIZE && value == grid.get(i, j + 1) {
                return false;
            }
            if i + 1 < GRID_SIZE && value == grid.get(i + 1, j) {
                return false;
            }
        }
    }
    true
}
