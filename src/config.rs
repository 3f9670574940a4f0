//! Startup configuration.

use crate::engine::Mode;
use crate::strategy::Difficulty;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Environment variable overriding the suggestion service endpoint.
pub const SUGGESTION_URL_VAR: &str = "TICTACTOE_SUGGESTION_URL";

fn default_timeout_secs() -> u64 {
    5
}

/// Suggestion service endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Endpoint URL.
    url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl SuggestionConfig {
    /// Creates endpoint settings with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// The endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Application configuration, loaded from a TOML file plus environment
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial game mode.
    #[serde(default)]
    mode: Mode,

    /// Initial opponent difficulty.
    #[serde(default)]
    difficulty: Difficulty,

    /// Suggestion service for the boss tier; absent means the boss tier
    /// plays the hard heuristic.
    #[serde(default)]
    suggestion: Option<SuggestionConfig>,
}

impl AppConfig {
    /// The configured mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The configured difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The suggestion endpoint, if configured.
    pub fn suggestion(&self) -> Option<&SuggestionConfig> {
        self.suggestion.as_ref()
    }

    /// Overrides the mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Overrides the difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = %config.mode, difficulty = %config.difficulty, "Config loaded");
        Ok(config)
    }

    /// Loads configuration, tolerating a missing file.
    ///
    /// A present-but-broken file is still an error; only absence falls back
    /// to defaults. Environment overrides apply either way.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            debug!("No config file, using defaults");
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Applies environment overrides.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(SUGGESTION_URL_VAR) {
            if url.is_empty() {
                warn!("Ignoring empty {}", SUGGESTION_URL_VAR);
            } else {
                info!(%url, "Suggestion endpoint set from environment");
                let timeout_secs = self
                    .suggestion
                    .as_ref()
                    .map(|s| s.timeout_secs)
                    .unwrap_or_else(default_timeout_secs);
                self.suggestion = Some(SuggestionConfig { url, timeout_secs });
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
