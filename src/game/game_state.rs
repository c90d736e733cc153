use crate::game::direction::Direction;
use crate::game::grid::{create_grid_empty, Grid, GRID_SIZE};
use crate::game::is_terminal::is_terminal;
use crate::game::merge::slide;
use crate::game::palette::{tile_style, TileStyle};
use crate::game::spawn::spawn_tile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Outcome of one [`Game::play`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub moved: bool,
    pub gained: u32,
    pub spawned: Option<(usize, usize, u32)>,
    pub terminal: bool,
}

impl MoveResult {
    fn unchanged() -> Self {
        Self {
            moved: false,
            gained: 0,
            spawned: None,
            terminal: false,
        }
    }
}

/// Read-only view of a game for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub grid: [[u32; GRID_SIZE]; GRID_SIZE],
    pub styles: [[TileStyle; GRID_SIZE]; GRID_SIZE],
    pub score: u32,
    pub moves: u32,
    pub highest_tile: u32,
    pub game_over: bool,
}

/// One game session: the board, its running score and the random source
/// used for spawning tiles.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    grid: Grid,
    score: u32,
    moves: u32,
    finished: bool,
    rng: R,
}

impl Game<StdRng> {
    /// New game seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// New game with a reproducible spawn sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    /// Starts a game with two spawned tiles.
    pub fn with_rng(rng: R) -> Self {
        let mut game = Self {
            grid: create_grid_empty(),
            score: 0,
            moves: 0,
            finished: false,
            rng,
        };
        game.restart();
        game
    }

    /// Resumes from an existing board. No tiles are spawned.
    pub fn from_parts(grid: Grid, score: u32, rng: R) -> Self {
        Self {
            grid,
            score,
            moves: 0,
            finished: false,
            rng,
        }
    }

    /// Clears the board and score and spawns the two opening tiles, keeping
    /// the random stream.
    pub fn restart(&mut self) {
        self.grid = create_grid_empty();
        self.score = 0;
        self.moves = 0;
        self.finished = false;
        self.spawn_tile();
        self.spawn_tile();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of moves that changed the board.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// True once [`Game::play`] has observed a terminal board.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Slides without spawning. Returns whether any cell changed.
    pub fn slide(&mut self, direction: Direction) -> bool {
        let (slid, gained) = slide(&self.grid, direction);
        if slid == self.grid {
            return false;
        }
        self.grid = slid;
        self.score += gained;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.slide(Direction::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.slide(Direction::Right)
    }

    pub fn move_up(&mut self) -> bool {
        self.slide(Direction::Up)
    }

    pub fn move_down(&mut self) -> bool {
        self.slide(Direction::Down)
    }

    pub fn spawn_tile(&mut self) -> Option<(usize, usize, u32)> {
        spawn_tile(&mut self.grid, &mut self.rng)
    }

    pub fn is_terminal(&self) -> bool {
        is_terminal(&self.grid)
    }

    /// One turn: slide, spawn a tile if the board changed, then check for a
    /// terminal board. A move that changes nothing is not a turn.
    pub fn play(&mut self, direction: Direction) -> MoveResult {
        if self.finished {
            return MoveResult::unchanged();
        }
        let before = self.score;
        if !self.slide(direction) {
            return MoveResult::unchanged();
        }
        self.moves += 1;
        let spawned = self.spawn_tile();
        self.finished = self.is_terminal();
        MoveResult {
            moved: true,
            gained: self.score - before,
            spawned,
            terminal: self.finished,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.cells,
            styles: self.grid.cells.map(|row| row.map(tile_style)),
            score: self.score,
            moves: self.moves,
            highest_tile: self.grid.highest_tile(),
            game_over: self.finished,
        }
    }
}
