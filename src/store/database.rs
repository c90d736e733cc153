//! SQLite-backed player score store

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::models::{LeaderboardEntry, PlayerRecord};
use crate::{Result, StorageError};

/// Long-lived handle on the score database.
///
/// Clones share one connection; every operation holds the connection lock
/// for its whole duration, so updates to a player never interleave.
#[derive(Debug)]
pub struct ScoreStore {
    conn: Arc<Mutex<Connection>>,
}

impl ScoreStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StorageError::from)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Create in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_tables()?;
        Ok(store)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement leaves SQLite itself consistent.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn init_tables(&self) -> Result<()> {
        let conn = self.lock();

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                best_score INTEGER NOT NULL DEFAULT 0,
                games_played INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_players_best_score ON players(best_score DESC);
            "#,
        )?;

        Ok(())
    }

    /// Find a player by name
    pub fn get(&self, name: &str) -> Result<Option<PlayerRecord>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT name, best_score, games_played, created_at
             FROM players WHERE name = ?1",
        )?;

        let mut rows = stmt.query(params![name])?;
        if let Some(row) = rows.next()? {
            Ok(Some(PlayerRecord {
                name: row.get(0)?,
                best_score: row.get(1)?,
                games_played: row.get(2)?,
                created_at: row.get(3)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Register a player with zeroed statistics.
    ///
    /// Returns `false` without touching the existing row when the name is
    /// already taken.
    pub fn create(&self, name: &str) -> Result<bool> {
        let conn = self.lock();
        let now = chrono::Utc::now().to_rfc3339();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO players (name, created_at) VALUES (?1, ?2)",
            params![name, now],
        )?;
        Ok(inserted == 1)
    }

    /// Fetch a player, registering it first if needed.
    pub fn get_or_create(&self, name: &str) -> Result<PlayerRecord> {
        if let Some(record) = self.get(name)? {
            return Ok(record);
        }
        self.create(name)?;
        self.get(name)?
            .ok_or_else(|| rusqlite::Error::QueryReturnedNoRows.into())
    }

    /// Record a finished game: keep the higher of the stored and final
    /// score and count one more game. Returns the resulting best score.
    ///
    /// An unknown name leaves the table untouched and yields `final_score`.
    pub fn record_game_end(&self, name: &str, final_score: u32) -> Result<u32> {
        let mut conn = self.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current: Option<u32> = tx
            .query_row(
                "SELECT best_score FROM players WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        let best = current.unwrap_or(0).max(final_score);
        if current.is_some() {
            tx.execute(
                "UPDATE players SET best_score = ?1, games_played = games_played + 1
                 WHERE name = ?2",
                params![best, name],
            )?;
        } else {
            log::warn!("Game end recorded for unknown player: {}", name);
        }
        tx.commit()?;

        Ok(best)
    }

    /// Best players first. Equal scores keep registration order.
    pub fn top_n(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT name, best_score, games_played FROM players
             ORDER BY best_score DESC, id ASC LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, u32>(2)?,
            ))
        })?;

        let mut entries = Vec::new();
        for (index, row) in rows.enumerate() {
            let (name, best_score, games_played) = row?;
            entries.push(LeaderboardEntry {
                rank: index + 1,
                name,
                best_score,
                games_played,
            });
        }
        Ok(entries)
    }

    pub fn player_count(&self) -> Result<usize> {
        let conn = self.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    #[cfg(test)]
    pub(crate) fn execute_raw(&self, sql: &str) -> Result<()> {
        self.lock().execute_batch(sql)?;
        Ok(())
    }
}

impl Clone for ScoreStore {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
