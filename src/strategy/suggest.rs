//! The move-suggestion collaborator contract for the Boss tier.

use crate::engine::Board;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::error;

/// A proposed move from the suggestion service.
///
/// The index arrives untrusted: the Boss tier range-checks it and verifies
/// the square is still empty before playing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Proposed square index. Valid proposals lie in 0..=8.
    #[serde(rename = "move")]
    index: i64,
    /// The service's claim that the move wins, if it offers one.
    win: Option<bool>,
}

impl Suggestion {
    /// Creates a suggestion.
    pub fn new(index: i64, win: Option<bool>) -> Self {
        Self { index, win }
    }

    /// The proposed square index, unvalidated.
    pub fn index(&self) -> i64 {
        self.index
    }

    /// The service's win claim, if any.
    pub fn win(&self) -> Option<bool> {
        self.win
    }
}

/// Suggestion collaborator failure.
///
/// Absorbed entirely inside the Boss tier; it never propagates past the
/// strategy dispatch.
#[derive(Debug, Clone, Display, Error)]
#[display("Suggestion error: {} at {}:{}", message, file, line)]
pub struct SuggestError {
    /// Error message.
    pub message: String,
    /// Line number where the error was created.
    pub line: u32,
    /// Source file where the error was created.
    pub file: &'static str,
}

impl SuggestError {
    /// Creates a new suggestion error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "Suggestion error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A source of move proposals for the Boss tier.
#[async_trait::async_trait]
pub trait MoveSuggester: Send + Sync {
    /// Proposes a move for the board's current position.
    async fn suggest(&self, board: &Board) -> Result<Suggestion, SuggestError>;
}

/// Suggester used when no service is configured. Always fails, so the
/// Boss tier degrades to the Hard heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSuggester;

#[async_trait::async_trait]
impl MoveSuggester for OfflineSuggester {
    async fn suggest(&self, _board: &Board) -> Result<Suggestion, SuggestError> {
        Err(SuggestError::new(
            "No suggestion service configured".to_string(),
        ))
    }
}
