//! Play a board game against the UCT search engine.
//!
//! The engine owns X and takes the opening move; pass `--human-first` to
//! open yourself. Moves are read from stdin, the board is printed after
//! every half-move, and the verdict is announced when the game ends.

use anyhow::{bail, Result};
use clap::Parser;
use game_core::Player;
use mcts::UctConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

mod config;
mod session;

use crate::config::Config;
use crate::session::play_match;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(
        game = %config.game,
        simulations = config.simulations,
        human_first = config.human_first,
        "starting match"
    );

    let mut rng = match config.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let engine = if config.human_first {
        Player::O
    } else {
        Player::X
    };
    let search = UctConfig::default()
        .with_simulations(config.simulations)
        .with_exploration(config.exploration);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let verdict = match config.game.as_str() {
        "tictactoe" => play_match(
            games_tictactoe::State::new(config.board_size),
            engine,
            &search,
            &mut rng,
            &mut input,
            &mut output,
        )?,
        "connect4" => play_match(
            games_connect4::State::new(),
            engine,
            &search,
            &mut rng,
            &mut input,
            &mut output,
        )?,
        other => bail!("unknown game '{other}'"),
    };

    info!(verdict = %verdict, "match finished");
    Ok(())
}
