//! Difficulty-tiered opponent move selection.
//!
//! Each tier is a pure function from a board snapshot to an empty square,
//! dispatched by [`Difficulty`]. The Boss tier consults an external
//! [`MoveSuggester`] and silently falls back to the Hard heuristic when the
//! collaborator fails or proposes an unplayable square.

mod heuristic;
mod remote;
mod suggest;

pub use remote::HttpSuggester;
pub use suggest::{MoveSuggester, OfflineSuggester, SuggestError, Suggestion};

use crate::engine::{Board, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Opponent difficulty tier.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Uniform-random among empty squares.
    Easy,
    /// Fair coin per move between [`Difficulty::Hard`] and
    /// [`Difficulty::Easy`].
    Medium,
    /// Deterministic heuristic: win, block, center, corner, edge.
    Hard,
    /// External suggestion service, falling back to Hard.
    Boss,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

/// Error returned when move selection is invoked in violation of its
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SelectError {
    /// The board has no empty square to choose from.
    #[display("Cannot select a move on a full board")]
    BoardFull,
}

impl std::error::Error for SelectError {}

/// Selects a move for the player to move on `board`.
///
/// The caller guarantees at least one empty square; a full board is a
/// contract violation and fails fast with [`SelectError::BoardFull`].
/// Every other path terminates in a playable square: suggestion-service
/// failures are absorbed by the Hard fallback and are never surfaced as
/// errors.
#[instrument(skip(board, rng, suggester), fields(%difficulty))]
pub async fn select_move<R: Rng>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
    suggester: &dyn MoveSuggester,
) -> Result<Position, SelectError> {
    if board.is_full() {
        return Err(SelectError::BoardFull);
    }

    match difficulty {
        Difficulty::Easy => easy(board, rng),
        Difficulty::Medium => medium(board, rng),
        Difficulty::Hard => hard(board, rng),
        Difficulty::Boss => Ok(boss(board, rng, suggester).await),
    }
}

/// Uniform-random choice among empty squares.
fn easy<R: Rng>(board: &Board, rng: &mut R) -> Result<Position, SelectError> {
    Position::empty_squares(board)
        .choose(rng)
        .copied()
        .ok_or(SelectError::BoardFull)
}

/// Coin flip between the hard and easy strategies.
///
/// The flip happens on every move rather than once per game, so the tier
/// plays sharp and careless moves interleaved.
fn medium<R: Rng>(board: &Board, rng: &mut R) -> Result<Position, SelectError> {
    if rng.gen_bool(0.5) {
        debug!("Medium tier playing the hard strategy");
        hard(board, rng)
    } else {
        debug!("Medium tier playing the easy strategy");
        easy(board, rng)
    }
}

/// Priority-ordered heuristic for the mover derived from board parity.
fn hard<R: Rng>(board: &Board, rng: &mut R) -> Result<Position, SelectError> {
    heuristic::pick(board, board.to_move(), rng)
}

/// Asks the suggestion collaborator, validating its proposal.
///
/// Any failure (transport error, malformed payload, an index outside the
/// board, an occupied square) routes to the Hard heuristic for the same
/// board. The fallback is invisible to the caller; the `warn!` records it
/// for diagnostics.
async fn boss<R: Rng>(
    board: &Board,
    rng: &mut R,
    suggester: &dyn MoveSuggester,
) -> Position {
    match suggester.suggest(board).await {
        Ok(suggestion) => match validate(board, &suggestion) {
            Some(pos) => {
                debug!(%pos, "Playing suggested move");
                return pos;
            }
            None => {
                warn!(
                    proposed = suggestion.index(),
                    "Suggestion is not a playable square, falling back to hard"
                );
            }
        },
        Err(error) => {
            warn!(%error, "Suggestion service failed, falling back to hard");
        }
    }

    // The board is known non-full, so the heuristic cannot fail here.
    hard(board, rng).unwrap_or(Position::Center)
}

/// Checks a proposal against the board: in range and currently empty.
fn validate(board: &Board, suggestion: &Suggestion) -> Option<Position> {
    let index = usize::try_from(suggestion.index()).ok()?;
    let pos = Position::from_index(index)?;
    board.is_empty(pos).then_some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Player, Square};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn easy_only_picks_empty_squares() {
        let board = Board::new()
            .with(Position::Center, Square::Occupied(Player::X))
            .with(Position::TopLeft, Square::Occupied(Player::O));

        for seed in 0..32 {
            let pos = easy(&board, &mut rng(seed)).unwrap();
            assert!(board.is_empty(pos), "picked occupied {pos:?}");
        }
    }

    #[test]
    fn medium_is_reproducible_per_seed() {
        let board = Board::new().with(Position::Center, Square::Occupied(Player::X));

        for seed in 0..16 {
            let a = medium(&board, &mut rng(seed)).unwrap();
            let b = medium(&board, &mut rng(seed)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn validate_rejects_out_of_range_and_occupied() {
        let board = Board::new().with(Position::Center, Square::Occupied(Player::X));

        assert_eq!(validate(&board, &Suggestion::new(9, None)), None);
        assert_eq!(validate(&board, &Suggestion::new(-1, None)), None);
        assert_eq!(validate(&board, &Suggestion::new(4, None)), None);
        assert_eq!(
            validate(&board, &Suggestion::new(0, Some(false))),
            Some(Position::TopLeft)
        );
    }
}
