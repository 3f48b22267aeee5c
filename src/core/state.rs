//! Game phase and state snapshots.
//!
//! ## GamePhase
//!
//! `AwaitingMove(side)` until a termination condition fires, then `GameOver`.
//! No transition leaves `GameOver`.
//!
//! ## GameSnapshot
//!
//! Read-only copy of everything needed to resume a game: board, scores,
//! round counter, active side and phase. Round-trips losslessly
//! through `serde_json` and `bincode`.

use serde::{Deserialize, Serialize};

use super::side::{Score, Side};
use crate::board::Board;

/// Round counter in effect for a move by `side` played at `round`.
///
/// Side A opens every round, so its moves advance the counter before they
/// resolve; side B's moves see the counter unchanged.
#[must_use]
pub const fn round_for_move(round: u32, side: Side) -> u32 {
    match side {
        Side::A => round + 1,
        Side::B => round,
    }
}

/// Final outcome of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Winner(Side),
    Draw,
}

impl GameResult {
    /// Winner by score comparison, draw on a tie.
    #[must_use]
    pub fn from_score(score: &Score) -> Self {
        match score.leader() {
            Some(side) => GameResult::Winner(side),
            None => GameResult::Draw,
        }
    }

    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::Winner(side) => Some(side),
            GameResult::Draw => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(side) => write!(f, "side {} wins", side),
            GameResult::Draw => f.write_str("draw"),
        }
    }
}

/// Which termination condition ended the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    #[display("both mandarins captured")]
    BothMandarinsCaptured,
    #[display("score threshold reached")]
    ScoreThreshold,
    #[display("round limit reached")]
    RoundLimit,
    #[display("field empty and too few points to restore")]
    CannotRestore,
}

/// Controller state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Waiting for the given side to move.
    AwaitingMove(Side),

    /// Terminal.
    GameOver {
        result: GameResult,
        reason: EndReason,
        message: String,
    },
}

impl GamePhase {
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::GameOver { .. })
    }

    /// The result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self {
            GamePhase::GameOver { result, .. } => Some(*result),
            GamePhase::AwaitingMove(_) => None,
        }
    }
}

/// Serializable view of a game.
///
/// ## Example
///
/// ```
/// use o_an_quan::core::{GameSnapshot, Side};
/// use o_an_quan::turn::TurnController;
///
/// let snapshot = TurnController::new().current_state();
/// let bytes = snapshot.to_bytes().unwrap();
/// let back = GameSnapshot::from_bytes(&bytes).unwrap();
///
/// assert_eq!(back, snapshot);
/// assert_eq!(back.active_side, Side::A);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub score: Score,
    pub round: u32,
    pub active_side: Side,
    pub phase: GamePhase,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    /// Total capture value held by both scores and the board.
    #[must_use]
    pub fn total_value(&self) -> u32 {
        self.score.total() + self.board.total_value()
    }
}
