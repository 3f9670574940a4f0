//! Command-line interface for tictactoe_arena.

use clap::{Parser, Subcommand};
use tictactoe_arena::{Difficulty, Mode};

/// Tic-tac-toe with a replayable timeline and tiered computer opponents
#[derive(Parser, Debug)]
#[command(name = "tictactoe_arena")]
#[command(about = "Tic-tac-toe engine with tiered computer opponents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Path to the configuration file
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: std::path::PathBuf,

        /// Game mode override (PvP or PvC)
        #[arg(long)]
        mode: Option<Mode>,

        /// Difficulty override (easy, medium, hard, boss)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// RNG seed for reproducible opponent play
        #[arg(long)]
        seed: Option<u64>,
    },
}
