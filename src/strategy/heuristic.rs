//! The hard tier: a strict-priority placement heuristic.

use super::SelectError;
use crate::engine::{self, Board, Player, Position, Square};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Picks a square for `mover` by the first rule that applies:
///
/// 1. a square that completes a line for the mover,
/// 2. a square that would complete a line for the opponent (block),
/// 3. the center,
/// 4. a random empty corner,
/// 5. a random empty edge,
/// 6. any remaining empty square.
///
/// Rule 6 cannot fire on a 3×3 board before center, corners, and edges are
/// exhausted; it stays so the function is total over non-full boards.
pub(super) fn pick<R: Rng>(
    board: &Board,
    mover: Player,
    rng: &mut R,
) -> Result<Position, SelectError> {
    if let Some(pos) = winning_square(board, mover) {
        debug!(%pos, "Taking the win");
        return Ok(pos);
    }

    if let Some(pos) = winning_square(board, mover.opponent()) {
        debug!(%pos, "Blocking the opponent");
        return Ok(pos);
    }

    if board.is_empty(Position::Center) {
        return Ok(Position::Center);
    }

    if let Some(pos) = choose_empty(board, &Position::CORNERS, rng) {
        return Ok(pos);
    }

    if let Some(pos) = choose_empty(board, &Position::EDGES, rng) {
        return Ok(pos);
    }

    choose_empty(board, &Position::ALL, rng).ok_or(SelectError::BoardFull)
}

/// Finds an empty square that would complete a line for `player`.
fn winning_square(board: &Board, player: Player) -> Option<Position> {
    Position::empty_squares(board).into_iter().find(|pos| {
        let probe = board.with(*pos, Square::Occupied(player));
        engine::winner(&probe).is_some_and(|win| win.winner() == player)
    })
}

/// Uniform-random choice among the empty squares of `candidates`.
fn choose_empty<R: Rng>(
    board: &Board,
    candidates: &[Position],
    rng: &mut R,
) -> Option<Position> {
    let open: Vec<Position> = candidates
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    open.choose(rng).copied()
}
