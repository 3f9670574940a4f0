//! Tic-tac-toe engine with a replayable move timeline and tiered computer
//! opponents.
//!
//! # Architecture
//!
//! - **Engine**: board state, turn order, move validation, win/draw
//!   detection, and an addressable history of snapshots (undo/redo)
//! - **Strategy**: difficulty-tiered opponent move selection; the top tier
//!   consults a remote suggestion service and falls back to the local
//!   heuristic on any failure
//! - **Session**: serialized access to one game, driving the computer's
//!   reply after each human move
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_arena::{AppConfig, GameSession};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load("tictactoe.toml")?;
//! let mut session = GameSession::from_config(&config);
//!
//! let status = session.play(4).await?;
//! println!("{:?}", status);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod prefs;
mod session;
mod strategy;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, SuggestionConfig, SUGGESTION_URL_VAR};

// Crate-level exports - Engine
pub use engine::{
    evaluate, winner, Board, GameEngine, GameStatus, JumpError, Mode, MoveError,
    MoveOrigin, Player, Position, Scoreboard, Square, Timeline, Win, LINES,
};

// Crate-level exports - Opponent strategy
pub use strategy::{
    select_move, Difficulty, HttpSuggester, MoveSuggester, OfflineSuggester,
    SelectError, SuggestError, Suggestion,
};

// Crate-level exports - Session
pub use session::GameSession;

// Crate-level exports - Preferences
pub use prefs::{
    Preferences, DARK_KEY, DIFFICULTY_KEY, MODE_KEY, SCORES_KEY,
};
