//! The board: twelve squares arranged in a ring.
//!
//! - `ring`: fixed ring order and neighbor arithmetic
//! - `occupancy`: token piles per square and pure occupancy queries
//!
//! Nothing here knows the capture rules; see `rules` for those.

pub mod occupancy;
pub mod ring;

pub use occupancy::Board;
pub use ring::{next_square, ring_index, ring_neighbor};
