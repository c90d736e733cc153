//! Durable per-player score tracking
//!
//! One SQLite table keyed by player name holding the best score, the number
//! of finished games and the registration time.

pub mod database;
pub mod models;

pub use database::ScoreStore;
pub use models::{LeaderboardEntry, PlayerRecord};
