//! HTTP client for the move-suggestion service.

use super::suggest::{MoveSuggester, SuggestError, Suggestion};
use crate::engine::{Board, Player, Square};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Request body: the board as a nullable cell array, `null` for empty
/// squares and `"X"`/`"O"` for marks.
#[derive(Debug, Serialize)]
struct SuggestRequest {
    board: [Option<&'static str>; 9],
}

impl SuggestRequest {
    fn from_board(board: &Board) -> Self {
        let mut cells = [None; 9];
        for (i, square) in board.squares().iter().enumerate() {
            cells[i] = match square {
                Square::Empty => None,
                Square::Occupied(Player::X) => Some("X"),
                Square::Occupied(Player::O) => Some("O"),
            };
        }
        Self { board: cells }
    }
}

/// Move-suggestion client speaking JSON over HTTP.
///
/// Posts the serialized board and expects `{ "move": int, "win": bool|null }`
/// back. Every failure mode (connection, timeout, HTTP status, payload
/// shape) maps to [`SuggestError`] and leaves fallback handling to the
/// Boss tier.
#[derive(Debug, Clone)]
pub struct HttpSuggester {
    client: reqwest::Client,
    url: String,
}

impl HttpSuggester {
    /// Creates a client for the given endpoint with a request timeout.
    #[instrument(skip(url), fields(url = %url.as_ref()))]
    pub fn new(url: impl AsRef<str>, timeout: Duration) -> Result<Self, SuggestError> {
        info!("Creating suggestion client");
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                SuggestError::new(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: url.as_ref().to_string(),
        })
    }
}

#[async_trait::async_trait]
impl MoveSuggester for HttpSuggester {
    #[instrument(skip(self, board), fields(url = %self.url))]
    async fn suggest(&self, board: &Board) -> Result<Suggestion, SuggestError> {
        debug!("Requesting move suggestion");

        let response = self
            .client
            .post(&self.url)
            .json(&SuggestRequest::from_board(board))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Suggestion request failed");
                SuggestError::new(format!("Suggestion request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read suggestion response");
            SuggestError::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %body, "Suggestion service error");
            return Err(SuggestError::new(format!(
                "Suggestion service error {}: {}",
                status, body
            )));
        }

        debug!(response_length = body.len(), "Parsing suggestion response");
        let suggestion: Suggestion = serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, response = %body, "Malformed suggestion payload");
            SuggestError::new(format!("Malformed suggestion payload: {}", e))
        })?;

        info!(proposed = suggestion.index(), "Suggestion received");
        Ok(suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Position;

    #[test]
    fn request_serializes_cells_as_nullable_marks() {
        let board = Board::new()
            .with(Position::TopLeft, Square::Occupied(Player::X))
            .with(Position::Center, Square::Occupied(Player::O));

        let request = SuggestRequest::from_board(&board);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "board": ["X", null, null, null, "O", null, null, null, null]
            })
        );
    }

    #[test]
    fn response_parses_with_and_without_win_claim() {
        let s: Suggestion = serde_json::from_str(r#"{"move": 4, "win": true}"#).unwrap();
        assert_eq!(s.index(), 4);
        assert_eq!(s.win(), Some(true));

        let s: Suggestion = serde_json::from_str(r#"{"move": 0, "win": null}"#).unwrap();
        assert_eq!(s.index(), 0);
        assert_eq!(s.win(), None);

        assert!(serde_json::from_str::<Suggestion>(r#"{"win": true}"#).is_err());
    }
}
