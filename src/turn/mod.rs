//! Turn controller: restore check, move resolution, termination, handoff.

pub mod controller;

pub use controller::{MoveOutcome, Restoration, TurnController};
