//! Plain-data preference snapshot for the persistence collaborator.
//!
//! The core performs no I/O: an external collaborator stores these values
//! as string key-value pairs and hands them back at startup. The keys
//! mirror the web client's localStorage names so existing saves keep
//! working.

use crate::engine::{GameEngine, Mode, Scoreboard};
use crate::strategy::Difficulty;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Storage key for the game mode.
pub const MODE_KEY: &str = "ticTacToeMode";
/// Storage key for the opponent difficulty.
pub const DIFFICULTY_KEY: &str = "ticTacToeDifficulty";
/// Storage key for the dark-mode display preference.
pub const DARK_KEY: &str = "ticTacToeDark";
/// Storage key for the scoreboard.
pub const SCORES_KEY: &str = "ticTacToeScores";

/// Everything the persistence collaborator stores between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Game mode.
    pub mode: Mode,
    /// Opponent difficulty.
    pub difficulty: Difficulty,
    /// Dark-mode display preference (owned by the UI, stored with the rest).
    pub dark_mode: bool,
    /// Win counts.
    pub scores: Scoreboard,
}

impl Preferences {
    /// Snapshots the persistable state of an engine.
    pub fn capture(engine: &GameEngine, dark_mode: bool) -> Self {
        Self {
            mode: engine.mode(),
            difficulty: engine.difficulty(),
            dark_mode,
            scores: engine.scores(),
        }
    }

    /// Builds a fresh engine carrying these preferences.
    pub fn restore(&self) -> GameEngine {
        let mut engine = GameEngine::with_config(self.mode, self.difficulty);
        engine.restore_scores(self.scores);
        engine
    }

    /// Projects the preferences onto string key-value pairs.
    pub fn entries(&self) -> Result<Vec<(String, String)>, serde_json::Error> {
        Ok(vec![
            (MODE_KEY.to_string(), self.mode.to_string()),
            (DIFFICULTY_KEY.to_string(), self.difficulty.to_string()),
            (DARK_KEY.to_string(), self.dark_mode.to_string()),
            (SCORES_KEY.to_string(), serde_json::to_string(&self.scores)?),
        ])
    }

    /// Rebuilds preferences from stored key-value pairs.
    ///
    /// Unknown keys are ignored and unparseable values fall back to the
    /// default for that key, so a corrupt store never blocks startup.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut prefs = Self::default();

        for (key, value) in entries {
            match key {
                MODE_KEY => match Mode::from_str(value) {
                    Ok(mode) => prefs.mode = mode,
                    Err(_) => warn!(value, "Ignoring unrecognized stored mode"),
                },
                DIFFICULTY_KEY => match Difficulty::from_str(value) {
                    Ok(difficulty) => prefs.difficulty = difficulty,
                    Err(_) => warn!(value, "Ignoring unrecognized stored difficulty"),
                },
                DARK_KEY => prefs.dark_mode = value == "true",
                SCORES_KEY => match serde_json::from_str(value) {
                    Ok(scores) => prefs.scores = scores,
                    Err(error) => {
                        warn!(%error, "Ignoring unreadable stored scores")
                    }
                },
                _ => {}
            }
        }

        prefs
    }
}
