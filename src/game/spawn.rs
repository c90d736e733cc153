use crate::game::grid::Grid;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Probability that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// Value of a freshly spawned tile: 2 with probability 0.9, else 4.
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.random_bool(TWO_PROBABILITY) {
        2
    } else {
        4
    }
}

/// Places one new tile in a uniformly chosen empty cell.
///
/// Returns the cell and value placed, or `None` when the grid is full.
pub fn spawn_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<(usize, usize, u32)> {
    let empty = grid.empty_cells();
    let &(row, col) = empty.choose(rng)?;
    let value = random_tile_value(rng);
    grid.set(row, col, value);
    Some((row, col, value))
}
