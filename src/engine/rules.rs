//! Win and draw evaluation.

use super::position::Position;
use super::types::{Board, Player, Square};
use serde::{Deserialize, Serialize};

/// The eight winning lines: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    winner: Player,
    line: [Position; 3],
}

impl Win {
    /// The winning player.
    pub fn winner(&self) -> Player {
        self.winner
    }

    /// The three positions forming the completed line.
    pub fn line(&self) -> [Position; 3] {
        self.line
    }
}

/// Current status of the game, derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Win),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// True once the game has ended in a win or draw.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Checks for a winner on the board.
///
/// At most one line can be fully held by a single player on a reachable
/// board, so the scan order never changes the answer.
pub fn winner(board: &Board) -> Option<Win> {
    for line in LINES {
        let [a, b, c] = line;
        let occ = board.get(a);

        if occ != Square::Empty && occ == board.get(b) && occ == board.get(c) {
            if let Square::Occupied(player) = occ {
                return Some(Win {
                    winner: player,
                    line,
                });
            }
        }
    }

    None
}

/// Evaluates the board into a game status.
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(win) = winner(board) {
        GameStatus::Won(win)
    } else if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: [Option<Player>; 9]) -> Board {
        let mut board = Board::new();
        for (i, mark) in marks.iter().enumerate() {
            if let Some(player) = mark {
                let pos = Position::from_index(i).unwrap();
                board = board.with(pos, Square::Occupied(*player));
            }
        }
        board
    }

    use Player::{O, X};

    #[test]
    fn empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn row_win_reports_line() {
        let board = board_from([
            Some(X),
            Some(X),
            Some(X),
            Some(O),
            Some(O),
            None,
            None,
            None,
            None,
        ]);

        let win = winner(&board).expect("top row is complete");
        assert_eq!(win.winner(), X);
        assert_eq!(
            win.line(),
            [Position::TopLeft, Position::TopCenter, Position::TopRight]
        );
    }

    #[test]
    fn diagonal_win_detected() {
        let board = board_from([
            Some(O),
            Some(X),
            Some(X),
            None,
            Some(O),
            None,
            Some(X),
            None,
            Some(O),
        ]);

        let win = winner(&board).expect("main diagonal is complete");
        assert_eq!(win.winner(), O);
    }

    #[test]
    fn full_board_without_winner_is_draw() {
        // X O X / X O O / O X X
        let board = board_from([
            Some(X),
            Some(O),
            Some(X),
            Some(X),
            Some(O),
            Some(O),
            Some(O),
            Some(X),
            Some(X),
        ]);

        assert_eq!(winner(&board), None);
        assert_eq!(evaluate(&board), GameStatus::Draw);
    }
}
