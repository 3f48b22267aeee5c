//! Board occupancy: which tokens sit on which square.
//!
//! The board has no rule knowledge. It stores one token pile per square in a
//! fixed array indexed by `Square` and answers pure queries.

use serde::{Deserialize, Serialize};

use crate::core::constants::{INITIAL_PEASANTS, RING_LEN};
use crate::core::token::pile_value;
use crate::core::{Pile, Side, Square, Token};

/// Token piles for all twelve squares.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [Pile; RING_LEN],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with the opening layout.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Create a board with no tokens at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            squares: Default::default(),
        }
    }

    /// Restore the opening layout: five peasants on every field square and
    /// one mandarin on each store, all owned by the square's side.
    pub fn reset(&mut self) {
        for square in Square::RING {
            let pile = &mut self.squares[square.index()];
            pile.clear();
            if square.is_store() {
                pile.push(Token::mandarin(square.side()));
            } else {
                let peasant = Token::peasant(square.side());
                pile.extend(std::iter::repeat(peasant).take(INITIAL_PEASANTS));
            }
        }
    }

    // === Queries ===

    /// Tokens on a square, bottom first.
    #[must_use]
    pub fn tokens(&self, square: Square) -> &[Token] {
        &self.squares[square.index()]
    }

    /// Number of tokens on a square.
    #[must_use]
    pub fn count(&self, square: Square) -> usize {
        self.squares[square.index()].len()
    }

    #[must_use]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_empty()
    }

    /// Number of peasants on a square.
    #[must_use]
    pub fn peasant_count(&self, square: Square) -> usize {
        self.tokens(square).iter().filter(|t| !t.is_mandarin()).count()
    }

    /// Whether a square still holds a mandarin.
    #[must_use]
    pub fn has_mandarin(&self, square: Square) -> bool {
        self.tokens(square).iter().any(|t| t.is_mandarin())
    }

    /// True once neither store holds a mandarin.
    #[must_use]
    pub fn both_mandarins_captured(&self) -> bool {
        !self.has_mandarin(Square::QA) && !self.has_mandarin(Square::QB)
    }

    /// Field squares of `side` holding at least one peasant, ordered `X1..X5`.
    #[must_use]
    pub fn available_origins(&self, side: Side) -> Vec<Square> {
        Square::fields(side)
            .into_iter()
            .filter(|&s| self.peasant_count(s) > 0)
            .collect()
    }

    /// Whether all five field squares of `side` are empty.
    #[must_use]
    pub fn field_is_empty(&self, side: Side) -> bool {
        Square::fields(side).iter().all(|&s| self.is_empty(s))
    }

    /// Total number of tokens on the board.
    #[must_use]
    pub fn total_tokens(&self) -> usize {
        self.squares.iter().map(|p| p.len()).sum()
    }

    /// Total capture value of everything on the board.
    #[must_use]
    pub fn total_value(&self) -> u32 {
        self.squares.iter().map(|p| pile_value(p)).sum()
    }

    // === Mutation ===

    /// Replace the contents of a square.
    pub fn set(&mut self, square: Square, tokens: impl IntoIterator<Item = Token>) {
        let pile = &mut self.squares[square.index()];
        pile.clear();
        pile.extend(tokens);
    }

    /// Put one token on a square.
    pub fn push(&mut self, square: Square, token: Token) {
        self.squares[square.index()].push(token);
    }

    /// Remove and return every peasant on a square, leaving mandarins.
    pub fn take_peasants(&mut self, square: Square) -> Pile {
        let pile = &mut self.squares[square.index()];
        let (mandarins, peasants): (Pile, Pile) = pile.drain(..).partition(|t| t.is_mandarin());
        *pile = mandarins;
        peasants
    }

    /// Remove and return everything on a square.
    pub fn take_all(&mut self, square: Square) -> Pile {
        std::mem::take(&mut self.squares[square.index()])
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cell = |s: Square| {
            let mark = if self.has_mandarin(s) { "*" } else { "" };
            format!("{}{}", self.count(s), mark)
        };
        let row = |side: Side| -> Vec<String> {
            Square::fields(side)
                .iter()
                .map(|&s| format!("{:>4}", cell(s)))
                .collect()
        };
        let top = row(Side::A);
        let bottom = row(Side::B);
        writeln!(f, "      {}", top.join(""))?;
        writeln!(f, "{:>4}{:>26}", cell(Square::QA), cell(Square::QB))?;
        writeln!(f, "      {}", bottom.join(""))
    }
}
