//! Game engine: board state, turn order, validation, history, scoring.

mod game;
mod history;
mod position;
mod rules;
mod types;

pub use game::{GameEngine, Mode, MoveError, MoveOrigin, Scoreboard};
pub use history::{JumpError, Timeline};
pub use position::Position;
pub use rules::{evaluate, winner, GameStatus, Win, LINES};
pub use types::{Board, Player, Square};
