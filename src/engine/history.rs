//! Board snapshot timeline with a movable cursor.

use super::types::Board;
use tracing::{debug, instrument, warn};

/// Error returned for an out-of-range history jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Ply {} is out of range (history has {} entries)", requested, len)]
pub struct JumpError {
    /// The requested ply.
    pub requested: usize,
    /// Number of entries in the history.
    pub len: usize,
}

impl std::error::Error for JumpError {}

/// Ordered board snapshots indexed by ply, plus the active cursor.
///
/// Ply 0 is the empty board. The cursor marks the snapshot currently in
/// play; it trails the end of the timeline whenever moves have been undone.
/// Recording a move from that state prunes the abandoned branch first.
///
/// Invariant: `cursor < entries.len()`, and `entries` is never empty.
#[derive(Debug, Clone)]
pub struct Timeline {
    entries: Vec<Board>,
    cursor: usize,
}

impl Timeline {
    /// Creates a timeline holding only the empty board.
    pub fn new() -> Self {
        Self {
            entries: vec![Board::new()],
            cursor: 0,
        }
    }

    /// The board at the cursor.
    pub fn current(&self) -> &Board {
        &self.entries[self.cursor]
    }

    /// The active ply.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The board at the given ply, if recorded.
    pub fn at(&self, ply: usize) -> Option<&Board> {
        self.entries.get(ply)
    }

    /// True when the cursor sits at the latest snapshot.
    pub fn at_end(&self) -> bool {
        self.cursor == self.entries.len() - 1
    }

    /// Records a new snapshot after the cursor and advances onto it.
    ///
    /// Any entries beyond the cursor belong to an undone branch and are
    /// discarded, so redo is unavailable once play diverges.
    #[instrument(skip(self, board), fields(cursor = self.cursor, len = self.entries.len()))]
    pub fn record(&mut self, board: Board) {
        let pruned = self.entries.len() - (self.cursor + 1);
        if pruned > 0 {
            debug!(pruned, "Discarding undone branch");
            self.entries.truncate(self.cursor + 1);
        }

        self.entries.push(board);
        self.cursor = self.entries.len() - 1;
    }

    /// Moves the cursor to the given ply without touching the snapshots.
    #[instrument(skip(self), fields(len = self.entries.len()))]
    pub fn jump(&mut self, ply: usize) -> Result<(), JumpError> {
        if ply >= self.entries.len() {
            warn!(ply, "Rejected jump beyond recorded history");
            return Err(JumpError {
                requested: ply,
                len: self.entries.len(),
            });
        }

        self.cursor = ply;
        Ok(())
    }

    /// Clears the timeline back to the empty board.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(Board::new());
        self.cursor = 0;
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Player, Position, Square};

    fn mark(board: &Board, pos: Position, player: Player) -> Board {
        board.with(pos, Square::Occupied(player))
    }

    #[test]
    fn starts_with_empty_board() {
        let timeline = Timeline::new();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.cursor(), 0);
        assert_eq!(*timeline.current(), Board::new());
    }

    #[test]
    fn record_advances_cursor() {
        let mut timeline = Timeline::new();
        let board = mark(timeline.current(), Position::Center, Player::X);
        timeline.record(board);

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.cursor(), 1);
        assert!(timeline.at_end());
    }

    #[test]
    fn jump_is_idempotent_and_bounded() {
        let mut timeline = Timeline::new();
        timeline.record(mark(timeline.current(), Position::Center, Player::X));
        timeline.record(mark(timeline.current(), Position::TopLeft, Player::O));

        timeline.jump(1).unwrap();
        let first = *timeline.current();
        timeline.jump(1).unwrap();
        assert_eq!(*timeline.current(), first);

        let err = timeline.jump(3).unwrap_err();
        assert_eq!(err.requested, 3);
        assert_eq!(err.len, 3);
        // Failed jump leaves the cursor where it was.
        assert_eq!(timeline.cursor(), 1);
    }

    #[test]
    fn record_after_jump_prunes_branch() {
        let mut timeline = Timeline::new();
        timeline.record(mark(timeline.current(), Position::Center, Player::X));
        timeline.record(mark(timeline.current(), Position::TopLeft, Player::O));
        assert_eq!(timeline.len(), 3);

        timeline.jump(1).unwrap();
        timeline.record(mark(timeline.current(), Position::BottomRight, Player::O));

        // The old ply 2 is gone; the new branch is the only future.
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.cursor(), 2);
        assert!(timeline.at(2).unwrap().is_empty(Position::TopLeft));
    }
}
