use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hanoi_game_engine::cli::{Session, SessionOptions};
use hanoi_game_engine::engine::settings::{load_default_settings, load_settings, StoreBackend};
use hanoi_game_engine::store::{open_store, PlayerDirectory};

#[derive(Parser)]
#[command(name = "hanoi", about = "Tower of Hanoi in the terminal")]
struct Cli {
    /// Number of pegs
    #[arg(long, env = "HANOI_PEGS")]
    pegs: Option<usize>,

    /// Number of disks
    #[arg(long, env = "HANOI_DISKS")]
    disks: Option<usize>,

    /// Seed for the initial disk scatter
    #[arg(long)]
    seed: Option<u64>,

    /// Path to hanoi.toml (default: auto-discover)
    #[arg(long, env = "HANOI_SETTINGS")]
    settings: Option<PathBuf>,

    /// Player store backend
    #[arg(long, value_enum, env = "HANOI_STORE")]
    store: Option<StoreBackend>,

    /// SQLite database path
    #[arg(long, env = "HANOI_DB")]
    db: Option<String>,

    /// Timeout for each player store call (ms)
    #[arg(long)]
    store_timeout_ms: Option<u64>,

    /// Log in as this player without prompting
    #[arg(long)]
    player: Option<String>,

    /// Disable ANSI disk colors
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match cli.settings {
        Some(ref path) => load_settings(path)?,
        None => load_default_settings(),
    };
    if let Some(pegs) = cli.pegs {
        settings.game.pegs = pegs;
    }
    if let Some(disks) = cli.disks {
        settings.game.disks = disks;
    }
    if cli.seed.is_some() {
        settings.game.seed = cli.seed;
    }
    if let Some(backend) = cli.store {
        settings.store.backend = backend;
    }
    if let Some(db) = cli.db {
        settings.store.database_path = db;
    }
    if let Some(timeout_ms) = cli.store_timeout_ms {
        settings.store.timeout_ms = timeout_ms;
    }
    settings.validate()?;

    let directory = PlayerDirectory::new(open_store(&settings.store)?, settings.store_timeout());
    tracing::info!(
        backend = ?settings.store.backend,
        timeout = ?directory.timeout(),
        pegs = settings.game.pegs,
        disks = settings.game.disks,
        "starting session"
    );

    let options = SessionOptions {
        game: settings.game_config(),
        nickname: cli.player,
        color: !cli.no_color,
    };
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    Session::new(input, tokio::io::stdout(), directory, options)
        .run()
        .await?;

    Ok(())
}
