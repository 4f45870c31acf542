//! Command-line interface for the Gomoku runner.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, GameConfig};

/// Gomoku - five in a row against the computer
#[derive(Parser, Debug, Default)]
#[command(name = "gomoku")]
#[command(about = "Play five in a row against an alpha-beta AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML file with board_size, search_depth and ai_time_limit_ms
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board size (overrides the config file)
    #[arg(long)]
    pub size: Option<usize>,

    /// AI search depth in plies (overrides the config file)
    #[arg(long)]
    pub depth: Option<u8>,

    /// AI time limit per move in milliseconds (overrides the config file)
    #[arg(long)]
    pub time_limit_ms: Option<u64>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(depth) = self.depth {
            config.search_depth = depth;
        }
        if let Some(ms) = self.time_limit_ms {
            config.ai_time_limit_ms = ms;
        }
        config.validate()?;
        Ok(config)
    }
}
