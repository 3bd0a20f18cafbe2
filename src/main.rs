use anyhow::{Context, Result};
use clap::Parser;
use classic_snake::game::GameConfig;
use classic_snake::leaderboard::{LeaderboardStore, DEFAULT_PATH};
use classic_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "classic_snake")]
#[command(version, about = "Snake game with a persisted leaderboard")]
struct Cli {
    /// JSON file with game settings; missing keys take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play area width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Play area height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Edge length of one grid cell in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Leaderboard file
    #[arg(long, default_value = DEFAULT_PATH)]
    leaderboard: PathBuf,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.area_width = width;
        }
        if let Some(height) = self.height {
            config.area_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }

        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classic_snake=info".into()),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    config.validate().context("Invalid game configuration")?;
    tracing::info!(?config, "starting");

    let store = LeaderboardStore::new(&cli.leaderboard, config.leaderboard_capacity);
    let mut human_mode = HumanMode::new(config, store)?;
    human_mode.run().await?;

    Ok(())
}
