//! Per-game logs.
//!
//! A `GameLog` records everything needed to replay or audit one game: the
//! seed, the rules, every resolved move with its events, restore notes, and
//! the final snapshot. Logs are written as JSON or bincode, one file per game.

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};
use tracing::{debug, instrument};

use crate::core::{EndReason, GamePhase, GameResult, GameSnapshot, MoveRecord};
use crate::rules::ExtendedRuleSet;

/// On-disk encoding of a game log.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    #[default]
    Json,
    Bincode,
}

impl LogFormat {
    /// File extension used for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Bincode => "bin",
        }
    }

    /// Infer the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") => LogFormat::Bincode,
            _ => LogFormat::Json,
        }
    }
}

/// Record of one finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    /// Position of the game within its match.
    pub index: usize,

    /// Seed the game's random stream was created from.
    pub seed: u64,

    pub rules: ExtendedRuleSet,
    pub player_a: String,
    pub player_b: String,

    /// Resolved moves in play order.
    pub turns: Vec<MoveRecord>,

    /// Restore messages, in the order they happened.
    pub notes: Vec<String>,

    pub final_state: GameSnapshot,
}

impl GameLog {
    /// Result and end reason, taken from the final phase.
    #[must_use]
    pub fn outcome(&self) -> Option<(GameResult, EndReason)> {
        match &self.final_state.phase {
            GamePhase::GameOver { result, reason, .. } => Some((*result, *reason)),
            GamePhase::AwaitingMove(_) => None,
        }
    }

    /// File name for this log, e.g. `game-3-12345.json`.
    #[must_use]
    pub fn file_name(&self, format: LogFormat) -> String {
        format!("game-{}-{}.{}", self.index, self.seed, format.extension())
    }

    /// Encode in the given format.
    pub fn encode(&self, format: LogFormat) -> Result<Vec<u8>, LogError> {
        match format {
            LogFormat::Json => serde_json::to_vec_pretty(self)
                .map_err(|e| LogError::new(format!("Failed to encode JSON log: {}", e))),
            LogFormat::Bincode => bincode::serialize(self)
                .map_err(|e| LogError::new(format!("Failed to encode bincode log: {}", e))),
        }
    }

    /// Decode from bytes in the given format.
    pub fn decode(bytes: &[u8], format: LogFormat) -> Result<Self, LogError> {
        match format {
            LogFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| LogError::new(format!("Failed to decode JSON log: {}", e))),
            LogFormat::Bincode => bincode::deserialize(bytes)
                .map_err(|e| LogError::new(format!("Failed to decode bincode log: {}", e))),
        }
    }

    /// Write this log into `dir`, creating it if needed. Returns the file path.
    #[instrument(skip(self, dir), fields(index = self.index, dir = %dir.as_ref().display()))]
    pub fn write(&self, dir: impl AsRef<Path>, format: LogFormat) -> Result<PathBuf, LogError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| LogError::new(format!("Failed to create {}: {}", dir.display(), e)))?;

        let path = dir.join(self.file_name(format));
        let bytes = self.encode(format)?;
        std::fs::write(&path, bytes)
            .map_err(|e| LogError::new(format!("Failed to write {}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "Game log written");
        Ok(path)
    }

    /// Read a log written by [`GameLog::write`]; the format follows the extension.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| LogError::new(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::decode(&bytes, LogFormat::from_path(path))
    }
}

/// Log I/O or codec error with the location it was raised at.
#[derive(Debug, Clone, Display, Error)]
#[display("Log error: {} at {}:{}", message, file, line)]
pub struct LogError {
    pub message: String,
    pub line: u32,
    pub file: &'static str,
}

impl LogError {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Move, Score, Side, Square};
    use crate::rules::MoveEvent;
    use crate::turn::TurnController;

    fn sample_log() -> GameLog {
        let mut game = TurnController::new();
        let mv = Move::new(Square::A2, Direction::Clockwise);
        let outcome = game.apply_move(Side::A, mv, ExtendedRuleSet::none()).unwrap();
        GameLog {
            index: 3,
            seed: 77,
            rules: ExtendedRuleSet::all(),
            player_a: "random".to_string(),
            player_b: "greedy".to_string(),
            turns: vec![outcome.record],
            notes: vec!["side B paid 5 points to restore its field (0 left)".to_string()],
            final_state: game.current_state(),
        }
    }

    #[test]
    fn test_file_name() {
        let log = sample_log();
        assert_eq!(log.file_name(LogFormat::Json), "game-3-77.json");
        assert_eq!(log.file_name(LogFormat::Bincode), "game-3-77.bin");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(LogFormat::from_path(Path::new("x/game-1-2.bin")), LogFormat::Bincode);
        assert_eq!(LogFormat::from_path(Path::new("x/game-1-2.json")), LogFormat::Json);
        assert_eq!("BINCODE".parse::<LogFormat>().unwrap(), LogFormat::Bincode);
    }

    #[test]
    fn test_encode_decode_both_formats() {
        let log = sample_log();
        for format in [LogFormat::Json, LogFormat::Bincode] {
            let bytes = log.encode(format).unwrap();
            assert_eq!(GameLog::decode(&bytes, format).unwrap(), log);
        }
    }

    #[test]
    fn test_json_log_is_readable() {
        let bytes = sample_log().encode(LogFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["rules"], serde_json::json!(["E1", "E2", "E3", "E4", "E5"]));
        assert_eq!(json["turns"][0]["mv"]["origin"], "A2");
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let log = sample_log();

        let path = log.write(dir.path().join("nested"), LogFormat::Bincode).unwrap();
        assert!(path.ends_with("game-3-77.bin"));
        assert_eq!(GameLog::read(&path).unwrap(), log);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameLog::read(dir.path().join("game-0-0.json")).unwrap_err();
        assert!(err.message.contains("Failed to read"));
    }

    #[test]
    fn test_outcome_of_unfinished_game() {
        let log = sample_log();
        assert_eq!(log.outcome(), None);
        assert!(matches!(log.turns[0].events[0], MoveEvent::Pickup { .. }));
        assert_eq!(log.final_state.score, Score::default());
    }
}
