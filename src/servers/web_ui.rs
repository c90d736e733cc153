use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::game::direction::Direction;
use crate::services::game_service::{
    GameService, GameView, MoveOutcome, DEFAULT_LEADERBOARD_SIZE,
};
use crate::store::LeaderboardEntry;
use crate::Twenty48Error;

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SwitchPlayerRequest {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize, Debug, Clone)]
pub struct MoveResponse {
    #[serde(flatten)]
    pub outcome: MoveOutcome,
    pub state: GameView,
}

#[derive(Serialize, Debug, Clone)]
pub struct LeaderboardRow {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub label: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct WebUiConfig {
    pub port: u16,
    pub host: String,
    /// Directory holding `index.html` and its assets
    pub static_dir: PathBuf,
    pub leaderboard_size: usize,
}

impl Default for WebUiConfig {
    fn default() -> Self {
        Self {
            port: 2048,
            host: "127.0.0.1".to_string(),
            static_dir: PathBuf::from("web"),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

/// State shared by every handler. One lock guards the whole session, so
/// user actions are applied one at a time.
pub struct AppState {
    pub service: Arc<Mutex<GameService>>,
    pub static_dir: PathBuf,
    pub leaderboard_size: usize,
}

// ============================================================================
// SERVER
// ============================================================================

pub struct WebUiServer {
    config: WebUiConfig,
    state: Arc<AppState>,
}

impl WebUiServer {
    pub fn new(config: WebUiConfig, service: GameService) -> Self {
        let state = Arc::new(AppState {
            service: Arc::new(Mutex::new(service)),
            static_dir: config.static_dir.clone(),
            leaderboard_size: config.leaderboard_size,
        });
        Self { config, state }
    }

    pub fn config(&self) -> &WebUiConfig {
        &self.config
    }

    /// Serves until Ctrl-C.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let listener = TcpListener::bind(addr).await?;

        log::info!(
            "🎮 2048 server starting on http://{}:{}",
            self.config.host,
            self.config.port
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log::info!("Server stopped");
        Ok(())
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(serve_index))
            .route("/api/state", get(api_state))
            .route("/api/move/{direction}", post(api_move))
            .route("/api/new-game", post(api_new_game))
            .route("/api/player", get(api_player).post(api_switch_player))
            .route("/api/leaderboard", get(api_leaderboard))
            .fallback_service(ServeDir::new(&self.config.static_dir))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(Arc::clone(&self.state))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}

// ============================================================================
// ERROR MAPPING
// ============================================================================

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn failure_response(error: Twenty48Error) -> Response {
    match error {
        Twenty48Error::InvalidPlayerName(_) => {
            error_response(StatusCode::BAD_REQUEST, "Player name must not be empty")
        }
        Twenty48Error::StorageUnavailable(_) => {
            log::error!("Storage error: {}", error);
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Score storage is unavailable, try again",
            )
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn serve_index(State(state): State<Arc<AppState>>) -> Html<String> {
    let index_content = tokio::fs::read_to_string(state.static_dir.join("index.html"))
        .await
        .unwrap_or_else(|_| {
            r#"<!DOCTYPE html>
<html><head><title>2048</title></head>
<body>
<h1>2048</h1>
<p>index.html was not found in the static directory.</p>
<p>The JSON API is available under /api/.</p>
</body></html>"#
                .to_string()
        });

    Html(index_content)
}

/// Runs `action` against the session on the blocking thread pool. Store
/// calls are synchronous SQLite queries, so they must not run on the async
/// workers. The owned guard travels with the closure, which keeps user
/// actions applied one at a time.
async fn with_session<T, F>(state: &AppState, action: F) -> Result<T, Response>
where
    F: FnOnce(&mut GameService) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let mut service = Arc::clone(&state.service).lock_owned().await;
    match tokio::task::spawn_blocking(move || action(&mut *service)).await {
        Ok(result) => result.map_err(failure_response),
        Err(e) => {
            log::error!("Session task failed: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ))
        }
    }
}

async fn api_state(State(state): State<Arc<AppState>>) -> Response {
    match with_session(&state, |service| service.view()).await {
        Ok(view) => Json(view).into_response(),
        Err(response) => response,
    }
}

async fn api_move(
    State(state): State<Arc<AppState>>,
    Path(direction): Path<String>,
) -> Response {
    let direction = match direction.parse::<Direction>() {
        Ok(direction) => direction,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    let played = with_session(&state, move |service| {
        let outcome = service.apply_move(direction)?;
        Ok(MoveResponse {
            outcome,
            state: service.view()?,
        })
    })
    .await;
    match played {
        Ok(response) => Json(response).into_response(),
        Err(response) => response,
    }
}

async fn api_new_game(State(state): State<Arc<AppState>>) -> Response {
    let started = with_session(&state, |service| {
        service.new_game();
        service.view()
    })
    .await;
    match started {
        Ok(view) => Json(view).into_response(),
        Err(response) => response,
    }
}

async fn api_player(State(state): State<Arc<AppState>>) -> Response {
    match with_session(&state, |service| service.player_stats()).await {
        Ok(Some(stats)) => Json(stats).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "No statistics for this player"),
        Err(response) => response,
    }
}

async fn api_switch_player(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SwitchPlayerRequest>,
) -> Response {
    match with_session(&state, move |service| service.switch_player(&request.name)).await {
        Ok(stats) => Json(stats).into_response(),
        Err(response) => response,
    }
}

async fn api_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(state.leaderboard_size);
    match with_session(&state, move |service| service.leaderboard(limit)).await {
        Ok(entries) => {
            let rows: Vec<LeaderboardRow> = entries
                .into_iter()
                .map(|entry| LeaderboardRow {
                    label: entry.rank_label(),
                    entry,
                })
                .collect();
            Json(rows).into_response()
        }
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_ui_config_default() {
        let config = WebUiConfig::default();
        assert_eq!(config.port, 2048);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.leaderboard_size, DEFAULT_LEADERBOARD_SIZE);
    }

    #[test]
    fn test_switch_player_request_deserialization() {
        let request: SwitchPlayerRequest = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(request.name, "Ada");
    }

    #[test]
    fn test_invalid_name_maps_to_bad_request() {
        let response = failure_response(Twenty48Error::InvalidPlayerName(" ".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_error_maps_to_service_unavailable() {
        let response = failure_response(rusqlite::Error::InvalidQuery.into());
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_leaderboard_row_flattens_entry() {
        let entry = LeaderboardEntry {
            rank: 2,
            name: "Ada".to_string(),
            best_score: 512,
            games_played: 3,
        };
        let row = LeaderboardRow {
            label: entry.rank_label(),
            entry,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["best_score"], 512);
        assert_eq!(json["label"], "🥈");
    }

    #[test]
    fn test_directory_error_maps_to_service_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let response = failure_response(crate::StorageError::Io(io).into());
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_session_runs_off_the_async_workers() {
        let store = crate::ScoreStore::in_memory().unwrap();
        let service = GameService::new(crate::Game::with_seed(3), store, "Ada").unwrap();
        let server = WebUiServer::new(WebUiConfig::default(), service);

        let handler_thread = std::thread::current().id();
        let ran_on = with_session(&server.state, |service| {
            Ok((std::thread::current().id(), service.current_player().to_string()))
        })
        .await
        .ok();
        let (thread, player) = ran_on.unwrap();
        assert_ne!(thread, handler_thread);
        assert_eq!(player, "Ada");
    }
}
