//! A single game session: the engine plus its opponent strategy.

use crate::config::AppConfig;
use crate::engine::{GameEngine, GameStatus, JumpError, Mode, MoveError, MoveOrigin, Player};
use crate::strategy::{
    self, Difficulty, HttpSuggester, MoveSuggester, OfflineSuggester,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A game session owned by one caller.
///
/// Wraps the engine with the opponent strategy and serializes access by
/// construction: every operation takes `&mut self`, so two moves can never
/// interleave. After a human move in player-vs-computer mode the session
/// immediately runs the computer's reply through the same validation path.
///
/// While a Boss-tier suggestion is outstanding, [`GameSession::awaiting_opponent`]
/// reports true; callers should hold further input until the call returns.
pub struct GameSession {
    engine: GameEngine,
    suggester: Arc<dyn MoveSuggester>,
    rng: ChaCha8Rng,
    awaiting_opponent: bool,
}

impl GameSession {
    /// Creates a session with an explicit suggester.
    #[instrument(skip(suggester))]
    pub fn new(mode: Mode, difficulty: Difficulty, suggester: Arc<dyn MoveSuggester>) -> Self {
        info!(%mode, %difficulty, "Creating game session");
        Self {
            engine: GameEngine::with_config(mode, difficulty),
            suggester,
            rng: ChaCha8Rng::from_entropy(),
            awaiting_opponent: false,
        }
    }

    /// Creates a session from startup configuration.
    ///
    /// Wires the HTTP suggester when an endpoint is configured; otherwise
    /// the Boss tier degrades to the Hard heuristic via [`OfflineSuggester`].
    pub fn from_config(config: &AppConfig) -> Self {
        let suggester: Arc<dyn MoveSuggester> = match config.suggestion() {
            Some(suggestion) => match HttpSuggester::new(suggestion.url(), suggestion.timeout()) {
                Ok(client) => Arc::new(client),
                Err(error) => {
                    warn!(%error, "Suggestion client unavailable, boss tier will fall back");
                    Arc::new(OfflineSuggester)
                }
            },
            None => Arc::new(OfflineSuggester),
        };

        Self::new(config.mode(), config.difficulty(), suggester)
    }

    /// Reseeds the session's RNG for reproducible strategy runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Plays a human move, then the computer's reply when one is due.
    ///
    /// The reply is skipped when the human's move ends the game, when the
    /// mode is player-vs-player, or when it is still the human's ply (after
    /// an undo). Returns the status after all applied moves.
    #[instrument(skip(self), fields(mode = %self.engine.mode()))]
    pub async fn play(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        let mut status = self.engine.apply_move(index, MoveOrigin::Human)?;

        if self.opponent_to_move() {
            status = self.opponent_turn().await?;
        }

        Ok(status)
    }

    /// True when the computer owes a move.
    fn opponent_to_move(&self) -> bool {
        self.engine.mode() == Mode::PlayerVsComputer
            && !self.engine.status().is_over()
            && self.engine.current_player() == Player::O
    }

    /// Selects and applies the computer's move.
    async fn opponent_turn(&mut self) -> Result<GameStatus, MoveError> {
        self.awaiting_opponent = true;

        let selected = strategy::select_move(
            self.engine.board(),
            self.engine.difficulty(),
            &mut self.rng,
            self.suggester.as_ref(),
        )
        .await;

        self.awaiting_opponent = false;

        // A full board cannot be reached here: the game would already be
        // over and opponent_to_move() false.
        let pos = match selected {
            Ok(pos) => pos,
            Err(error) => {
                warn!(%error, "Opponent selection violated its contract");
                return Err(MoveError::GameOver);
            }
        };

        debug!(%pos, "Applying computer move");
        self.engine.apply_move(pos.to_index(), MoveOrigin::Computer)
    }

    /// True while an opponent selection is outstanding.
    pub fn awaiting_opponent(&self) -> bool {
        self.awaiting_opponent
    }

    /// The underlying engine, for queries.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    // ─────────────────────────────────────────────────────────────
    //  Engine passthroughs
    // ─────────────────────────────────────────────────────────────

    /// Steps back one ply.
    pub fn undo(&mut self) -> Result<(), JumpError> {
        self.engine.undo()
    }

    /// Steps forward one ply.
    pub fn redo(&mut self) -> Result<(), JumpError> {
        self.engine.redo()
    }

    /// Moves the cursor to the given ply.
    pub fn jump_to(&mut self, ply: usize) -> Result<(), JumpError> {
        self.engine.jump_to(ply)
    }

    /// Starts a fresh game, keeping the scoreboard.
    pub fn reset_game(&mut self) {
        self.engine.reset_game();
    }

    /// Zeroes the scoreboard.
    pub fn reset_scores(&mut self) {
        self.engine.reset_scores();
    }

    /// Switches mode and starts a fresh game.
    pub fn set_mode(&mut self, mode: Mode) {
        self.engine.set_mode(mode);
    }

    /// Switches difficulty and starts a fresh game.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.engine.set_difficulty(difficulty);
    }
}
