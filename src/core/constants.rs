//! Fixed game constants.
//!
//! These are rules of the game, not tuning knobs.

/// Number of squares on the ring.
pub const RING_LEN: usize = 12;

/// Field squares per side.
pub const FIELD_SQUARES_PER_SIDE: usize = 5;

/// Peasants placed on each field square at the start of a game.
pub const INITIAL_PEASANTS: usize = 5;

/// Points for a captured peasant.
pub const PEASANT_VALUE: u32 = 1;

/// Points for a captured mandarin.
pub const MANDARIN_VALUE: u32 = 5;

/// Minimum tokens on a store before its mandarin may be captured (rule E1).
pub const MATURE_MANDARIN_TOKENS: usize = 5;

/// Mandarins cannot be captured while `round < EARLY_GAME_ROUNDS` (rule E3).
pub const EARLY_GAME_ROUNDS: u32 = 3;

/// Points paid to put one peasant back on each empty field square.
pub const RESTORE_COST: u32 = 5;

/// A side reaching this score ends the game.
pub const WINNING_SCORE: u32 = 25;

/// The game ends once the round counter reaches this value.
pub const MAX_ROUNDS: u32 = 12;

/// Safety valve on the resolution loop. Reaching it is an engine bug.
pub const MAX_RESOLUTION_ITERATIONS: usize = 100;
