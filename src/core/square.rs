//! The twelve board squares and sowing directions.
//!
//! Squares are declared in ring order (`QA, A1..A5, QB, B5..B1`), so the
//! discriminant of a square is its ring index. The layout on the table is:
//!
//! ```text
//!       A1  A2  A3  A4  A5
//!   QA                      QB
//!       B1  B2  B3  B4  B5
//! ```
//!
//! Walking the ring with `Direction::Clockwise` goes `QA → A1 → … → A5 → QB →
//! B5 → … → B1 → QA`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::constants::{FIELD_SQUARES_PER_SIDE, RING_LEN};
use super::side::Side;

/// A board square, identified by its label.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Square {
    QA = 0,
    A1 = 1,
    A2 = 2,
    A3 = 3,
    A4 = 4,
    A5 = 5,
    QB = 6,
    B5 = 7,
    B4 = 8,
    B3 = 9,
    B2 = 10,
    B1 = 11,
}

impl Square {
    /// All squares in ring order.
    pub const RING: [Square; RING_LEN] = [
        Square::QA,
        Square::A1,
        Square::A2,
        Square::A3,
        Square::A4,
        Square::A5,
        Square::QB,
        Square::B5,
        Square::B4,
        Square::B3,
        Square::B2,
        Square::B1,
    ];

    const FIELDS_A: [Square; FIELD_SQUARES_PER_SIDE] =
        [Square::A1, Square::A2, Square::A3, Square::A4, Square::A5];

    const FIELDS_B: [Square; FIELD_SQUARES_PER_SIDE] =
        [Square::B1, Square::B2, Square::B3, Square::B4, Square::B5];

    /// Position on the ring (0..12).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Square at a ring position, taken modulo the ring length.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::RING[index % RING_LEN]
    }

    /// Whether this is a store (mandarin) square.
    #[must_use]
    pub const fn is_store(self) -> bool {
        matches!(self, Square::QA | Square::QB)
    }

    /// Whether this is a field (peasant) square.
    #[must_use]
    pub const fn is_field(self) -> bool {
        !self.is_store()
    }

    /// The side this square belongs to.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Square::QA | Square::A1 | Square::A2 | Square::A3 | Square::A4 | Square::A5 => Side::A,
            _ => Side::B,
        }
    }

    /// The store square of a side.
    #[must_use]
    pub const fn store(side: Side) -> Self {
        match side {
            Side::A => Square::QA,
            Side::B => Square::QB,
        }
    }

    /// The five field squares of a side, ordered `X1..X5`.
    #[must_use]
    pub const fn fields(side: Side) -> [Square; FIELD_SQUARES_PER_SIDE] {
        match side {
            Side::A => Self::FIELDS_A,
            Side::B => Self::FIELDS_B,
        }
    }
}

/// Sowing direction around the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Increasing ring index (+1).
    Clockwise,
    /// Decreasing ring index (-1).
    CounterClockwise,
}

impl Direction {
    /// Both directions.
    pub const ALL: [Direction; 2] = [Direction::Clockwise, Direction::CounterClockwise];

    /// Signed ring step.
    #[must_use]
    pub const fn offset(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Canonical text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Clockwise => "clockwise",
            Direction::CounterClockwise => "counter_clockwise",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = super::error::InvalidMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clockwise" | "cw" | "+1" | "1" => Ok(Direction::Clockwise),
            "counter_clockwise" | "counterclockwise" | "counter-clockwise" | "ccw" | "-1" => {
                Ok(Direction::CounterClockwise)
            }
            _ => Err(super::error::InvalidMove::UnknownDirection {
                text: s.to_string(),
            }),
        }
    }
}
