//! Terminal front end for the tic-tac-toe engine.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Write};
use tictactoe_arena::{AppConfig, GameSession, GameStatus, Player};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            mode,
            difficulty,
            seed,
        } => play(config, mode, difficulty, seed).await,
    }
}

/// Runs the interactive play loop.
async fn play(
    config_path: std::path::PathBuf,
    mode: Option<tictactoe_arena::Mode>,
    difficulty: Option<tictactoe_arena::Difficulty>,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = AppConfig::load(&config_path)?;
    if let Some(mode) = mode {
        config.set_mode(mode);
    }
    if let Some(difficulty) = difficulty {
        config.set_difficulty(difficulty);
    }

    info!(mode = %config.mode(), difficulty = %config.difficulty(), "Starting game");

    let mut session = GameSession::from_config(&config);
    if let Some(seed) = seed {
        session = session.with_seed(seed);
    }

    println!("Tic Tac Toe: {} ({})", config.mode(), config.difficulty());
    println!("Enter a square (0-8), or: u undo, r redo, n new game, q quit\n");

    let stdin = std::io::stdin();
    loop {
        render(&session);

        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "q" => break,
            "n" => session.reset_game(),
            "u" => {
                if session.undo().is_err() {
                    println!("Nothing to undo");
                }
            }
            "r" => {
                if session.redo().is_err() {
                    println!("Nothing to redo");
                }
            }
            input => match input.parse::<usize>() {
                Ok(index) => {
                    if let Err(error) = session.play(index).await {
                        println!("{}", error);
                    }
                }
                Err(_) => println!("Unrecognized input: {}", input),
            },
        }
    }

    Ok(())
}

/// Prints the board, status line, and scoreboard.
fn render(session: &GameSession) {
    let engine = session.engine();
    println!("{}", engine.board().display());

    match engine.status() {
        GameStatus::Won(win) => println!("Winner: {}", win.winner()),
        GameStatus::Draw => println!("It's a draw!"),
        GameStatus::InProgress => println!("Next player: {}", engine.current_player()),
    }

    let scores = engine.scores();
    println!(
        "Score  X: {} | O: {}\n",
        scores.wins(Player::X),
        scores.wins(Player::O)
    );
}
