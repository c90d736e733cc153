//! # twenty48
//!
//! A single-player 2048 sliding-tile puzzle with per-player score tracking.
//!
//! ## Features
//!
//! - **Grid Engine**: 4x4 board, slide/merge in four directions, tile spawning, terminal check
//! - **Score Store**: SQLite table of best score, games played and registration time per player
//! - **Game Service**: one game session bound to one store handle and an active player
//! - **Web UI Server**: JSON API and static browser front end
//!
//! ## Usage
//!
//! ```rust
//! use twenty48::{Direction, Game};
//!
//! let mut game = Game::with_seed(7);
//! let result = game.play(Direction::Left);
//! assert!(game.score() >= result.gained);
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Board, merge rules and game sessions
pub mod game;

/// Durable per-player scores
pub mod store;

/// Game session wired to the score store
pub mod services;

/// HTTP server for the browser UI
pub mod servers;

/// Logger setup
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::direction::Direction;
pub use game::game_state::{Game, GameSnapshot, MoveResult};
pub use game::grid::{Grid, GRID_SIZE};
pub use services::game_service::{GameService, DEFAULT_LEADERBOARD_SIZE, DEFAULT_PLAYER};
pub use servers::{WebUiConfig, WebUiServer};
pub use store::{LeaderboardEntry, PlayerRecord, ScoreStore};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the twenty48 library
#[derive(Debug, thiserror::Error)]
pub enum Twenty48Error {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    #[error("Invalid player name: {0:?}")]
    InvalidPlayerName(String),
}

/// Why the score store could not be opened, read or written.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("cannot prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for Twenty48Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::StorageUnavailable(StorageError::Sqlite(error))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Twenty48Error>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
