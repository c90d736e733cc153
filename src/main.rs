// main.rs - launches the 2048 web UI backed by the SQLite score store
use clap::Parser;
use std::path::PathBuf;

use twenty48::logging::setup_logging;
use twenty48::{
    Game, GameService, ScoreStore, WebUiConfig, WebUiServer, DEFAULT_LEADERBOARD_SIZE,
    DEFAULT_PLAYER,
};

#[derive(Parser, Debug)]
#[command(name = "twenty48", version, about)]
struct Config {
    /// Address to bind the web UI to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the web UI
    #[arg(short = 'p', long, default_value_t = 2048)]
    port: u16,

    /// Path to the SQLite score database
    #[arg(long, default_value = "data/twenty48.db")]
    db_path: PathBuf,

    /// Player active at startup
    #[arg(long, default_value = DEFAULT_PLAYER)]
    player: String,

    /// Seed for tile spawning (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rows in the leaderboard
    #[arg(long, default_value_t = DEFAULT_LEADERBOARD_SIZE)]
    leaderboard_size: usize,

    /// Directory holding the browser UI
    #[arg(long, default_value = "web")]
    static_dir: PathBuf,

    /// Write rotating log files to this directory instead of stderr
    #[arg(long)]
    log_dir: Option<String>,

    /// Print the leaderboard and exit
    #[arg(long, default_value_t = false)]
    print_leaderboard: bool,
}

fn print_leaderboard(store: &ScoreStore, limit: usize) -> twenty48::Result<()> {
    let entries = store.top_n(limit)?;
    if entries.is_empty() {
        println!("No players yet.");
        return Ok(());
    }
    println!("{:<6} {:<24} {:>8} {:>6}", "Rank", "Player", "Best", "Games");
    for entry in entries {
        println!(
            "{:<6} {:<24} {:>8} {:>6}",
            entry.rank_label(),
            entry.name,
            entry.best_score,
            entry.games_played
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    let _logger = setup_logging(config.log_dir.as_deref())?;

    let store = ScoreStore::open(&config.db_path)?;
    log::info!(
        "Score database {} ({} players)",
        config.db_path.display(),
        store.player_count()?
    );

    if config.print_leaderboard {
        print_leaderboard(&store, config.leaderboard_size)?;
        return Ok(());
    }

    let game = match config.seed {
        Some(seed) => {
            log::info!("Tile spawns seeded with {}", seed);
            Game::with_seed(seed)
        }
        None => Game::new(),
    };
    let service = GameService::new(game, store, &config.player)?;
    log::info!("Active player: {}", service.current_player());

    let web_config = WebUiConfig {
        port: config.port,
        host: config.host,
        static_dir: config.static_dir,
        leaderboard_size: config.leaderboard_size,
    };

    WebUiServer::new(web_config, service).start().await
}
