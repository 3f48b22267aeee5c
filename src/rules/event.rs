//! Move events.
//!
//! A resolved move produces an ordered, append-only trace of atomic effects.
//! Callers replay it for animation or logging; the engine never reads it
//! back.

use serde::{Deserialize, Serialize};

use crate::core::{Score, Side, Square, Token};

/// One atomic effect of a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveEvent {
    /// Tokens lifted off a square to be sown.
    Pickup { square: Square, tokens: Vec<Token> },

    /// One token dropped while sowing. `from` is the previous square of the
    /// walk (the pickup square for the first drop).
    Drop { from: Square, to: Square, token: Token },

    /// Everything on `square` captured. `side` is the side the square belongs
    /// to, not the capturer.
    Capture { square: Square, side: Side, tokens: Vec<Token> },

    /// Scores after a capture.
    ScoreUpdate { score: Score },
}

impl MoveEvent {
    #[must_use]
    pub fn is_capture(&self) -> bool {
        matches!(self, MoveEvent::Capture { .. })
    }
}

impl std::fmt::Display for MoveEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveEvent::Pickup { square, tokens } => {
                write!(f, "pickup {} x{}", square, tokens.len())
            }
            MoveEvent::Drop { from, to, token } => write!(f, "drop {} {} -> {}", token, from, to),
            MoveEvent::Capture { square, tokens, .. } => {
                write!(f, "capture {} x{}", square, tokens.len())
            }
            MoveEvent::ScoreUpdate { score } => {
                write!(f, "score A={} B={}", score[Side::A], score[Side::B])
            }
        }
    }
}
