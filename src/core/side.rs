//! Sides and per-side data storage.
//!
//! ## Side
//!
//! The two players, `A` (owns the top row and `QA`) and `B` (bottom row and
//! `QB`). Side `A` always moves first.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`. Scores are a `SideMap<u32>`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::{Display, EnumIter, EnumString};

/// One of the two players.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Both sides, in turn order.
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    /// Get the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Slot index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use o_an_quan::core::{Side, SideMap};
///
/// let mut score: SideMap<u32> = SideMap::default();
/// score[Side::A] += 3;
///
/// assert_eq!(score[Side::A], 3);
/// assert_eq!(score[Side::B], 0);
/// assert_eq!(score.total(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map from explicit values for A and B.
    #[must_use]
    pub const fn new(a: T, b: T) -> Self {
        Self { data: [a, b] }
    }

    /// Create a map with values from a factory function.
    pub fn from_fn(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::A), factory(Side::B)],
        }
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl SideMap<u32> {
    /// Sum of both entries.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.data[0] + self.data[1]
    }

    /// The side holding the strictly larger value, `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<Side> {
        match self.data[0].cmp(&self.data[1]) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.data[side.index()]
    }
}

/// Score per side.
pub type Score = SideMap<u32>;
