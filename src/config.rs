//! Match configuration.
//!
//! Loaded from TOML; every field is optional and falls back to its default.
//!
//! ```toml
//! games = 10
//! seed = 42
//! extended_rules = ["E1", "E3"]
//! player_a = "greedy"
//! player_b = "random"
//! max_moves = 500
//! log_dir = "logs"
//! log_format = "json"
//! ```

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::agents::PlayerKind;
use crate::play::LogFormat;
use crate::rules::ExtendedRuleSet;

/// Default cap on moves per game before the runner gives up.
pub const DEFAULT_MAX_MOVES: usize = 500;

/// Settings for a batch of games between two agents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play.
    pub games: usize,

    /// Master seed; each game forks its own stream from it.
    pub seed: u64,

    /// Extended rules applied to every move.
    pub extended_rules: ExtendedRuleSet,

    pub player_a: PlayerKind,
    pub player_b: PlayerKind,

    /// Moves per game before the game is abandoned with an error.
    pub max_moves: usize,

    /// Where to write per-game logs. `None` disables logging to disk.
    pub log_dir: Option<PathBuf>,

    pub log_format: LogFormat,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 1,
            seed: 0,
            extended_rules: ExtendedRuleSet::none(),
            player_a: PlayerKind::Random,
            player_b: PlayerKind::Random,
            max_moves: DEFAULT_MAX_MOVES,
            log_dir: None,
            log_format: LogFormat::Json,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: ExtendedRuleSet) -> Self {
        self.extended_rules = rules;
        self
    }

    #[must_use]
    pub fn with_players(mut self, player_a: PlayerKind, player_b: PlayerKind) -> Self {
        self.player_a = player_a;
        self.player_b = player_b;
        self
    }

    #[must_use]
    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>, format: LogFormat) -> Self {
        self.log_dir = Some(dir.into());
        self.log_format = format;
        self
    }

    /// Parse from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading match config");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(games = config.games, rules = %config.extended_rules, "Match config loaded");
        Ok(config)
    }

    /// Reject values no match can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_moves == 0 {
            return Err(ConfigError::new("max_moves must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Configuration error with the location it was raised at.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    pub message: String,
    pub line: u32,
    pub file: &'static str,
}

impl ConfigError {
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
