//! Configuration for the play binary.
//!
//! Defaults can be overridden by PLAY_* environment variables.
//! CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

// Default value functions that read from the environment
fn default_game() -> String {
    std::env::var("PLAY_GAME").unwrap_or_else(|_| "tictactoe".to_string())
}

fn default_board_size() -> usize {
    std::env::var("PLAY_BOARD_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3)
}

fn default_simulations() -> u32 {
    std::env::var("PLAY_SIMULATIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1000)
}

fn default_exploration() -> f64 {
    std::env::var("PLAY_EXPLORATION")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1.4)
}

fn default_log_level() -> String {
    std::env::var("PLAY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "play")]
#[command(about = "Play a board game against the UCT search engine")]
#[command(
    long_about = "Interactive match against a Monte Carlo Tree Search engine.

The engine searches on its turns; your moves are read from stdin. Defaults
can be overridden by PLAY_* environment variables, and CLI arguments take
highest priority."
)]
pub struct Config {
    /// Game to play (tictactoe, connect4)
    #[arg(long, default_value_t = default_game())]
    pub game: String,

    /// Board side length for tictactoe (connect4 ignores this)
    #[arg(long, default_value_t = default_board_size())]
    pub board_size: usize,

    /// Number of search simulations per engine move
    #[arg(long, default_value_t = default_simulations())]
    pub simulations: u32,

    /// UCT exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// RNG seed for reproducible engine play
    #[arg(long)]
    pub seed: Option<u64>,

    /// Take the opening move yourself instead of giving it to the engine
    #[arg(long)]
    pub human_first: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.game.as_str(), "tictactoe" | "connect4") {
            return Err(anyhow!(
                "unknown game '{}', expected tictactoe or connect4",
                self.game
            ));
        }

        if !(2..=10).contains(&self.board_size) {
            return Err(anyhow!("board_size must be between 2 and 10"));
        }

        if self.simulations == 0 {
            return Err(anyhow!("simulations must be at least 1"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!("exploration must be a finite non-negative number"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }
}
