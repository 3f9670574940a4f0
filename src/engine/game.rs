//! The game engine: turn sequencing, validation, scoring, and history.

use super::history::{JumpError, Timeline};
use super::position::Position;
use super::rules::{self, GameStatus};
use super::types::{Board, Player, Square};
use crate::strategy::Difficulty;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Game mode.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Mode {
    /// Two humans sharing the board.
    #[serde(rename = "PvP")]
    #[strum(serialize = "PvP")]
    PlayerVsPlayer,
    /// A human (X) against the computer (O).
    #[serde(rename = "PvC")]
    #[strum(serialize = "PvC")]
    PlayerVsComputer,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::PlayerVsPlayer
    }
}

/// Who is submitting a move.
///
/// In [`Mode::PlayerVsComputer`] the engine refuses a human-originated
/// move on the computer's ply, so one player cannot drive both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveOrigin {
    /// A human pressed the square.
    Human,
    /// The opponent strategy chose the square.
    Computer,
}

/// Win counts per player, kept across games until explicitly reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Wins recorded for X.
    #[serde(rename = "X")]
    x: u32,
    /// Wins recorded for O.
    #[serde(rename = "O")]
    o: u32,
}

impl Scoreboard {
    /// Wins recorded for the given player.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// True while both counters are zero.
    pub fn is_blank(&self) -> bool {
        self.x == 0 && self.o == 0
    }

    fn record_win(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index does not address a square.
    #[display("Index {} is outside the board", _0)]
    OutOfBounds(usize),

    /// The square at the position is already occupied.
    #[display("{} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// A human move arrived on the computer's ply.
    #[display("It's the computer's turn")]
    NotYourTurn,
}

impl std::error::Error for MoveError {}

/// Turn-based game engine over a snapshot timeline.
///
/// Owns the history, the cursor, the scoreboard, and the mode/difficulty
/// configuration. Every operation is synchronous and applies atomically on
/// `&mut self`; rejected moves leave no trace.
#[derive(Debug, Clone)]
pub struct GameEngine {
    timeline: Timeline,
    scores: Scoreboard,
    mode: Mode,
    difficulty: Difficulty,
}

impl GameEngine {
    /// Creates an engine with an empty board, PvP mode, easy difficulty.
    pub fn new() -> Self {
        Self::with_config(Mode::default(), Difficulty::default())
    }

    /// Creates an engine with the given mode and difficulty.
    #[instrument]
    pub fn with_config(mode: Mode, difficulty: Difficulty) -> Self {
        info!(%mode, %difficulty, "Creating game engine");
        Self {
            timeline: Timeline::new(),
            scores: Scoreboard::default(),
            mode,
            difficulty,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Derived queries
    // ─────────────────────────────────────────────────────────────

    /// The board at the cursor.
    pub fn board(&self) -> &Board {
        self.timeline.current()
    }

    /// Status of the current board.
    pub fn status(&self) -> GameStatus {
        rules::evaluate(self.board())
    }

    /// True when the current board is a draw.
    pub fn is_draw(&self) -> bool {
        self.status() == GameStatus::Draw
    }

    /// The player whose ply this is: X on even plies, O on odd.
    pub fn current_player(&self) -> Player {
        if self.timeline.cursor() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// The active ply.
    pub fn ply(&self) -> usize {
        self.timeline.cursor()
    }

    /// Number of recorded snapshots (plies + 1).
    pub fn history_len(&self) -> usize {
        self.timeline.len()
    }

    /// The board recorded at the given ply, if any.
    pub fn board_at(&self, ply: usize) -> Option<&Board> {
        self.timeline.at(ply)
    }

    /// The scoreboard.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// The configured mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The configured difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// True when an earlier ply exists to jump back to.
    pub fn can_undo(&self) -> bool {
        self.timeline.cursor() > 0
    }

    /// True when an undone ply exists to jump forward to.
    pub fn can_redo(&self) -> bool {
        !self.timeline.at_end()
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Applies a move at the given square index.
    ///
    /// Preconditions are checked in order and the first failure rejects
    /// the move with no state change: the index must address a square, the
    /// square must be empty, the game must not be over, and in
    /// player-vs-computer mode the computer's ply only accepts
    /// [`MoveOrigin::Computer`].
    ///
    /// On success the new snapshot replaces any undone branch, and a move
    /// that completes a line credits the winner on the scoreboard in the
    /// same call. Returns the status of the resulting board.
    #[instrument(skip(self), fields(ply = self.ply(), mover = %self.current_player()))]
    pub fn apply_move(
        &mut self,
        index: usize,
        origin: MoveOrigin,
    ) -> Result<GameStatus, MoveError> {
        let pos = Position::from_index(index).ok_or_else(|| {
            warn!(index, "Rejected move outside the board");
            MoveError::OutOfBounds(index)
        })?;

        if !self.board().is_empty(pos) {
            warn!(%pos, "Rejected move on occupied square");
            return Err(MoveError::SquareOccupied(pos));
        }

        if self.status().is_over() {
            warn!(%pos, "Rejected move on finished game");
            return Err(MoveError::GameOver);
        }

        let mover = self.current_player();
        if self.mode == Mode::PlayerVsComputer
            && mover == Player::O
            && origin == MoveOrigin::Human
        {
            warn!(%pos, "Rejected human move on the computer's ply");
            return Err(MoveError::NotYourTurn);
        }

        let next = self.board().with(pos, Square::Occupied(mover));
        self.timeline.record(next);

        let status = rules::evaluate(&next);
        if let GameStatus::Won(win) = status {
            self.scores.record_win(win.winner());
            info!(winner = %win.winner(), "Game won, scoreboard updated");
        } else {
            debug!(%pos, %mover, "Move applied");
        }

        Ok(status)
    }

    /// Moves the cursor to the given ply.
    ///
    /// History and scores are untouched, so jumping is freely repeatable.
    pub fn jump_to(&mut self, ply: usize) -> Result<(), JumpError> {
        self.timeline.jump(ply)
    }

    /// Steps the cursor back one ply.
    pub fn undo(&mut self) -> Result<(), JumpError> {
        let target = self.timeline.cursor().checked_sub(1).ok_or(JumpError {
            requested: 0,
            len: self.timeline.len(),
        })?;
        self.jump_to(target)
    }

    /// Steps the cursor forward one ply.
    pub fn redo(&mut self) -> Result<(), JumpError> {
        self.jump_to(self.timeline.cursor() + 1)
    }

    // ─────────────────────────────────────────────────────────────
    //  Resets and configuration
    // ─────────────────────────────────────────────────────────────

    /// Starts a fresh game. The scoreboard is untouched.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        debug!("Resetting game");
        self.timeline.reset();
    }

    /// Zeroes both win counters. The game in progress is untouched.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        debug!("Resetting scores");
        self.scores.reset();
    }

    /// Replaces the scoreboard with persisted counts.
    ///
    /// The injection point for the persistence collaborator; gameplay only
    /// ever increments through [`GameEngine::apply_move`].
    pub fn restore_scores(&mut self, scores: Scoreboard) {
        self.scores = scores;
    }

    /// Sets the mode and starts a fresh game.
    ///
    /// Turn semantics differ between modes, so an in-progress game cannot
    /// survive the switch.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        info!(%mode, "Switching mode");
        self.mode = mode;
        self.reset_game();
    }

    /// Sets the difficulty and starts a fresh game.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(%difficulty, "Switching difficulty");
        self.difficulty = difficulty;
        self.reset_game();
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
