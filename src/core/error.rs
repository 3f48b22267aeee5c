//! Engine errors.
//!
//! Every rejected request leaves the game untouched: validation runs before
//! any mutation, and resolution works on a copy of the board.

use super::side::Side;
use super::square::Square;

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// Stores are never a sowing origin.
    #[display("{square} is a store square and cannot be sown from")]
    StoreOrigin { square: Square },

    /// The origin belongs to the other side.
    #[display("{square} does not belong to side {side}")]
    NotOwned { square: Square, side: Side },

    /// The origin has no peasants to pick up.
    #[display("{square} has no peasants to sow")]
    EmptyOrigin { square: Square },

    /// It is the other side's turn.
    #[display("it is not side {side}'s turn")]
    NotYourTurn { side: Side },

    /// Unrecognized square label.
    #[display("unknown square {text:?}")]
    UnknownSquare { text: String },

    /// Unrecognized direction.
    #[display("unknown direction {text:?}")]
    UnknownDirection { text: String },
}

impl std::error::Error for InvalidMove {}

/// Error returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The move was rejected; nothing changed.
    #[display("invalid move: {_0}")]
    InvalidMove(InvalidMove),

    /// The game has already ended.
    #[display("game is already over")]
    GameOver,

    /// The resolution loop hit its safety cap. Unreachable in correct play.
    #[display("move resolution did not settle within {iterations} iterations")]
    ResolutionLimit { iterations: usize },

    /// An agent had no move to offer on its turn.
    #[display("agent for side {side} returned no move")]
    NoMove { side: Side },

    /// A match exceeded its configured move cap.
    #[display("game did not finish within {moves} moves")]
    MoveLimit { moves: usize },
}

impl EngineError {
    /// Whether this error rejects a move (as opposed to an engine fault).
    #[must_use]
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, EngineError::InvalidMove(_))
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidMove(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<InvalidMove> for EngineError {
    fn from(err: InvalidMove) -> Self {
        EngineError::InvalidMove(err)
    }
}
