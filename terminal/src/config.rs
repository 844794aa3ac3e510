use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use common::GameConfig;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "splitsnake",
    about = "Terminal snake with power-ups, combos and a snake that splits in two"
)]
pub struct Cli {
    /// JSON file the top five scores are kept in
    #[arg(long, env = "SPLITSNAKE_SCORES", default_value = "splitsnake_scores.json")]
    pub scores: PathBuf,

    /// Seed for food placement and particles; random when unset
    #[arg(long, env = "SPLITSNAKE_SEED")]
    pub seed: Option<u64>,

    /// Base tick interval in milliseconds
    #[arg(long, env = "SPLITSNAKE_TICK_MS")]
    pub tick_ms: Option<u32>,

    /// Tick interval while the speed power-up is active
    #[arg(long)]
    pub fast_tick_ms: Option<u32>,

    /// Tiles per side of the board
    #[arg(long)]
    pub grid: Option<u16>,

    /// Full game config as JSON; the flags above override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "SPLITSNAKE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(tiles) = self.grid {
            config = config.with_grid_tiles(tiles);
        }
        if let Some(ms) = self.tick_ms {
            config.base_tick_ms = ms;
        }
        if let Some(ms) = self.fast_tick_ms {
            config.fast_tick_ms = ms;
        }
        config.seed = self.seed.or(config.seed).or_else(|| Some(rand::random()));

        config.validate().context("Invalid game config")?;
        Ok(config)
    }
}
