//! Ring arithmetic over the twelve squares.
//!
//! All lookups are modular; there is no out-of-range case.

use crate::core::constants::RING_LEN;
use crate::core::{Direction, Square};

/// Position of a square on the ring.
#[must_use]
pub const fn ring_index(square: Square) -> usize {
    square.index()
}

/// The square `steps` positions away from `square` in `direction`.
///
/// ```
/// use o_an_quan::board::ring_neighbor;
/// use o_an_quan::core::{Direction, Square};
///
/// assert_eq!(ring_neighbor(Square::A5, Direction::Clockwise, 1), Square::QB);
/// assert_eq!(ring_neighbor(Square::QA, Direction::CounterClockwise, 1), Square::B1);
/// ```
#[must_use]
pub fn ring_neighbor(square: Square, direction: Direction, steps: usize) -> Square {
    let ring = RING_LEN as isize;
    let shift = (steps % RING_LEN) as isize * direction.offset();
    let index = (ring_index(square) as isize + shift).rem_euclid(ring);
    Square::from_index(index as usize)
}

/// The adjacent square in `direction`.
#[must_use]
pub fn next_square(square: Square, direction: Direction) -> Square {
    ring_neighbor(square, direction, 1)
}
