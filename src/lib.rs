//! # o-an-quan
//!
//! Move-resolution engine for Ô Ăn Quan, the Vietnamese two-player sowing
//! game, plus the agents and match runner used to play it end to end.
//!
//! ## Design Principles
//!
//! 1. **Engine, not interface**: the core takes a fully-formed move and
//!    returns a new board, new scores, an event trace and a phase. It
//!    performs no I/O and never chooses moves.
//!
//! 2. **All-or-nothing moves**: validation runs first and resolution works
//!    on a copy, so a rejected move changes nothing.
//!
//! 3. **Closed rule set**: the optional rules E1..E5 are an enum, matched
//!    exhaustively wherever they gate behavior.
//!
//! ## Modules
//!
//! - `core`: sides, squares, tokens, moves, errors, snapshots, RNG
//! - `board`: ring arithmetic and token occupancy
//! - `rules`: extended rules, the move resolver, move events
//! - `turn`: the turn controller (restore, resolve, terminate, hand off)
//! - `agents`: random, greedy and scripted move choosers
//! - `play`: match runner and per-game logs
//! - `config`: TOML match configuration
//!
//! ## Example
//!
//! ```
//! use o_an_quan::{Direction, ExtendedRuleSet, Move, Side, Square, TurnController};
//!
//! let mut game = TurnController::new();
//! let outcome = game
//!     .apply_move(Side::A, Move::new(Square::A5, Direction::Clockwise), ExtendedRuleSet::none())
//!     .unwrap();
//!
//! assert!(!outcome.record.events.is_empty());
//! assert_eq!(game.active_side(), Side::B);
//! ```

pub mod agents;
pub mod board;
pub mod config;
pub mod core;
pub mod play;
pub mod rules;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Direction, EndReason, EngineError, GamePhase, GameResult, GameRng, GameSnapshot, InvalidMove,
    Move, MoveRecord, Pile, Score, Side, SideMap, Square, Token, TokenKind,
};

pub use crate::board::{next_square, ring_index, ring_neighbor, Board};

pub use crate::rules::{resolve, ExtendedRule, ExtendedRuleSet, MoveEvent, MoveResolver, Resolution};

pub use crate::turn::{MoveOutcome, Restoration, TurnController};

pub use crate::agents::{Agent, GreedyAgent, PlayerKind, RandomAgent, ScriptedAgent};

pub use crate::play::{GameLog, LogError, LogFormat, MatchRunner, MatchSummary};

pub use crate::config::{ConfigError, MatchConfig};
