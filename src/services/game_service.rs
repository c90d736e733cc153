// src/services/game_service.rs - the single game session and the score store behind the UI

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use crate::game::direction::Direction;
use crate::game::game_state::{Game, GameSnapshot};
use crate::store::{LeaderboardEntry, PlayerRecord, ScoreStore};
use crate::{Result, Twenty48Error};

/// Player active when nobody has picked a name yet.
pub const DEFAULT_PLAYER: &str = "Player";

/// Leaderboard length when the caller does not ask for one.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

// ============================================================================
// VIEWS
// ============================================================================

/// Board snapshot plus the active player's context.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    #[serde(flatten)]
    pub snapshot: GameSnapshot,
    pub player: String,
    pub best_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverSummary {
    pub final_score: u32,
    pub best_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub moved: bool,
    pub gained: u32,
    pub game_over: Option<GameOverSummary>,
}

/// Player statistics as shown in the stats panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub name: String,
    pub best_score: u32,
    pub games_played: u32,
    /// `YYYY-MM-DD`
    pub playing_since: Option<String>,
}

impl From<PlayerRecord> for PlayerStats {
    fn from(record: PlayerRecord) -> Self {
        let playing_since = record.created_on().map(|date| date.to_string());
        Self {
            name: record.name,
            best_score: record.best_score,
            games_played: record.games_played,
            playing_since,
        }
    }
}

/// Trims a submitted player name, rejecting blank ones.
pub fn validate_player_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Twenty48Error::InvalidPlayerName(name.to_string()));
    }
    Ok(trimmed)
}

// ============================================================================
// SERVICE
// ============================================================================

/// Owns the running game, the store handle and the active player name.
#[derive(Debug)]
pub struct GameService<R = StdRng> {
    game: Game<R>,
    store: ScoreStore,
    player: String,
}

impl<R: Rng + Clone> GameService<R> {
    /// Wires a game to a store and registers `player` if it is new.
    pub fn new(game: Game<R>, store: ScoreStore, player: &str) -> Result<Self> {
        let player = validate_player_name(player)?.to_string();
        store.get_or_create(&player)?;
        Ok(Self {
            game,
            store,
            player,
        })
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn current_player(&self) -> &str {
        &self.player
    }

    /// Drops the current board and deals a fresh one.
    pub fn new_game(&mut self) -> GameSnapshot {
        self.game.restart();
        log::info!("New game for {}", self.player);
        self.game.snapshot()
    }

    /// Plays one move. When the move ends the game, the result is stored
    /// before the new board is committed, so a storage failure leaves the
    /// session exactly as it was.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let mut next = self.game.clone();
        let result = next.play(direction);
        if !result.moved {
            return Ok(MoveOutcome {
                moved: false,
                gained: 0,
                game_over: None,
            });
        }
        log::debug!(
            "{} moved {}: +{} (score {})",
            self.player,
            direction,
            result.gained,
            next.score()
        );

        let game_over = if result.terminal {
            let final_score = next.score();
            let best_score = self.store.record_game_end(&self.player, final_score)?;
            log::info!(
                "Game over for {}: score={}, best={}",
                self.player,
                final_score,
                best_score
            );
            Some(GameOverSummary {
                final_score,
                best_score,
            })
        } else {
            None
        };

        self.game = next;
        Ok(MoveOutcome {
            moved: true,
            gained: result.gained,
            game_over,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn view(&self) -> Result<GameView> {
        let best_score = self
            .store
            .get(&self.player)?
            .map(|record| record.best_score)
            .unwrap_or(0);
        Ok(GameView {
            snapshot: self.game.snapshot(),
            player: self.player.clone(),
            best_score,
        })
    }

    pub fn player_stats(&self) -> Result<Option<PlayerStats>> {
        Ok(self.store.get(&self.player)?.map(PlayerStats::from))
    }

    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        self.store.top_n(limit)
    }

    /// Makes `name` the active player, registering it on first use. The
    /// current board carries over.
    pub fn switch_player(&mut self, name: &str) -> Result<PlayerStats> {
        let name = validate_player_name(name)?;
        let record = self.store.get_or_create(name)?;
        if self.player != record.name {
            log::info!("Active player changed: {} -> {}", self.player, record.name);
        }
        self.player = record.name.clone();
        Ok(PlayerStats::from(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Grid;
    use assert_matches::assert_matches;
    use rand::SeedableRng;

    fn service_with(grid: Grid) -> GameService {
        let game = Game::from_parts(grid, 40, StdRng::seed_from_u64(3));
        GameService::new(game, ScoreStore::in_memory().unwrap(), DEFAULT_PLAYER).unwrap()
    }

    /// One move right away from a terminal board.
    fn nearly_over() -> Grid {
        Grid::from_rows([
            [8, 16, 8, 16],
            [16, 8, 16, 8],
            [8, 16, 8, 16],
            [32, 64, 32, 0],
        ])
    }

    #[test]
    fn test_default_player_is_registered() {
        let service = service_with(nearly_over());
        let stats = service.player_stats().unwrap().unwrap();
        assert_eq!(stats.name, DEFAULT_PLAYER);
        assert_eq!(stats.games_played, 0);
        assert!(stats.playing_since.is_some());
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let mut service = service_with(nearly_over());
        assert_matches!(
            service.switch_player("   "),
            Err(Twenty48Error::InvalidPlayerName(_))
        );
        assert_matches!(service.switch_player(""), Err(Twenty48Error::InvalidPlayerName(_)));
        assert_eq!(service.current_player(), DEFAULT_PLAYER);
    }

    #[test]
    fn test_switch_player_trims_and_registers() {
        let mut service = service_with(nearly_over());
        let stats = service.switch_player("  Ada ").unwrap();
        assert_eq!(stats.name, "Ada");
        assert_eq!(service.current_player(), "Ada");
        assert!(service.store().get("Ada").unwrap().is_some());
        assert_eq!(service.store().player_count().unwrap(), 2);

        service.switch_player("Ada").unwrap();
        assert_eq!(service.store().player_count().unwrap(), 2);
    }

    #[test]
    fn test_game_end_is_recorded_once() {
        let mut service = service_with(nearly_over());
        let outcome = service.apply_move(Direction::Right).unwrap();
        assert!(outcome.moved);
        assert_eq!(
            outcome.game_over,
            Some(GameOverSummary {
                final_score: 40,
                best_score: 40
            })
        );
        assert!(service.snapshot().game_over);

        let again = service.apply_move(Direction::Left).unwrap();
        assert!(!again.moved);
        assert_eq!(again.game_over, None);

        let stats = service.player_stats().unwrap().unwrap();
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.best_score, 40);
        assert_eq!(service.view().unwrap().best_score, 40);
    }

    #[test]
    fn test_storage_failure_leaves_game_untouched() {
        let mut service = service_with(nearly_over());
        service.store().execute_raw("DROP TABLE players").unwrap();

        let before = *service.game().grid();
        assert_matches!(
            service.apply_move(Direction::Right),
            Err(Twenty48Error::StorageUnavailable(_))
        );
        assert_eq!(service.game().grid(), &before);
        assert_eq!(service.game().moves(), 0);
        assert!(!service.snapshot().game_over);
    }

    #[test]
    fn test_noop_move_changes_nothing() {
        let grid = Grid::from_rows([[2, 4, 8, 16], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let mut service = service_with(grid);
        let outcome = service.apply_move(Direction::Up).unwrap();
        assert!(!outcome.moved);
        assert_eq!(service.game().grid(), &grid);
        assert_eq!(service.game().score(), 40);
    }

    #[test]
    fn test_new_game_resets_board() {
        let mut service = service_with(nearly_over());
        service.apply_move(Direction::Right).unwrap();
        let snapshot = service.new_game();
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.game_over);
        assert_eq!(service.game().grid().count_empty(), 14);
    }

    #[test]
    fn test_leaderboard_reflects_finished_games() {
        let mut service = service_with(nearly_over());
        service.apply_move(Direction::Right).unwrap();
        service.switch_player("Zed").unwrap();

        let board = service.leaderboard(DEFAULT_LEADERBOARD_SIZE).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, DEFAULT_PLAYER);
        assert_eq!(board[0].best_score, 40);
        assert_eq!(board[1].name, "Zed");
    }
}
