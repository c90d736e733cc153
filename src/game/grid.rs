use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board.
pub const GRID_SIZE: usize = 4;

pub type Row = [u32; GRID_SIZE];

/// 4x4 board of tile values, row-major. A cell is 0 when empty, otherwise a
/// power of two >= 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid {
    pub cells: [Row; GRID_SIZE],
}

pub fn create_grid_empty() -> Grid {
    Grid {
        cells: [[0; GRID_SIZE]; GRID_SIZE],
    }
}

impl Grid {
    pub fn from_rows(cells: [Row; GRID_SIZE]) -> Self {
        Grid { cells }
    }

    pub fn rows(&self) -> &[Row; GRID_SIZE] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        self.cells[row][col] = value;
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for (i, row) in self.cells.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                if *value == 0 {
                    empty.push((i, j));
                }
            }
        }
        empty
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|v| **v == 0).count()
    }

    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Each row reversed (horizontal mirror). Its own inverse.
    pub fn mirrored(&self) -> Grid {
        let mut cells = self.cells;
        for row in cells.iter_mut() {
            row.reverse();
        }
        Grid { cells }
    }

    /// Rows become columns. Its own inverse.
    pub fn transposed(&self) -> Grid {
        let mut cells = [[0; GRID_SIZE]; GRID_SIZE];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                cells[j][i] = *value;
            }
        }
        Grid { cells }
    }
}

fn format_val(value: u32) -> String {
    if value == 0 {
        format!("{:>6}", ".")
    } else {
        format!("{:>6}", value)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().copied().map(format_val).collect();
            write!(f, "{}", line.join(""))?;
        }
        Ok(())
    }
}
