//! Moves and move history records.
//!
//! A move is an origin square plus a sowing direction. The engine never
//! decides where a move comes from (human, random agent, language model);
//! it only receives a fully-formed `Move`.

use serde::{Deserialize, Serialize};

use super::error::InvalidMove;
use super::side::{Score, Side};
use super::square::{Direction, Square};
use crate::rules::MoveEvent;

/// A requested move.
///
/// ## Example
///
/// ```
/// use o_an_quan::core::{Direction, Move, Square};
///
/// let mv = Move::parse("A3", "ccw").unwrap();
/// assert_eq!(mv, Move::new(Square::A3, Direction::CounterClockwise));
/// assert_eq!(mv.to_string(), "A3 counter_clockwise");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub origin: Square,
    pub direction: Direction,
}

impl Move {
    #[must_use]
    pub const fn new(origin: Square, direction: Direction) -> Self {
        Self { origin, direction }
    }

    /// Build a move from its text form, e.g. `("A1", "clockwise")`.
    pub fn parse(origin: &str, direction: &str) -> Result<Self, InvalidMove> {
        let origin = origin
            .trim()
            .parse::<Square>()
            .map_err(|_| InvalidMove::UnknownSquare {
                text: origin.to_string(),
            })?;
        let direction = direction.parse::<Direction>()?;
        Ok(Self::new(origin, direction))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.origin, self.direction)
    }
}

/// A resolved move with its effects, kept in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The side that moved.
    pub side: Side,

    /// The move played.
    pub mv: Move,

    /// Round counter the move was resolved under.
    pub round: u32,

    /// Ordered effect trace.
    pub events: Vec<MoveEvent>,

    /// Scores after the move.
    pub score: Score,
}

impl MoveRecord {
    /// Points gained by the mover during this move.
    #[must_use]
    pub fn points_captured(&self) -> u32 {
        self.events
            .iter()
            .filter_map(|e| match e {
                MoveEvent::Capture { tokens, .. } => Some(crate::core::token::pile_value(tokens)),
                _ => None,
            })
            .sum()
    }
}
