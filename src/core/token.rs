//! Board tokens.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::constants::{MANDARIN_VALUE, PEASANT_VALUE};
use super::side::Side;

/// Token kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Peasant,
    Mandarin,
}

/// A single piece on the board.
///
/// Tokens keep their owner while being sown; the owner only matters for
/// display and logs, points always go to the capturing side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub owner: Side,
}

impl Token {
    /// A peasant of the given side.
    #[must_use]
    pub const fn peasant(owner: Side) -> Self {
        Self {
            kind: TokenKind::Peasant,
            owner,
        }
    }

    /// A mandarin of the given side.
    #[must_use]
    pub const fn mandarin(owner: Side) -> Self {
        Self {
            kind: TokenKind::Mandarin,
            owner,
        }
    }

    #[must_use]
    pub const fn is_mandarin(self) -> bool {
        matches!(self.kind, TokenKind::Mandarin)
    }

    /// Points awarded for capturing this token.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self.kind {
            TokenKind::Peasant => PEASANT_VALUE,
            TokenKind::Mandarin => MANDARIN_VALUE,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            TokenKind::Peasant => "peasant",
            TokenKind::Mandarin => "mandarin",
        };
        write!(f, "{}_{}", kind, self.owner.to_string().to_ascii_lowercase())
    }
}

/// Tokens on one square.
/// Inline capacity covers the opening layout; long games spill to the heap.
pub type Pile = SmallVec<[Token; 8]>;

/// Total capture value of a slice of tokens.
#[must_use]
pub fn pile_value(tokens: &[Token]) -> u32 {
    tokens.iter().map(|t| t.value()).sum()
}
