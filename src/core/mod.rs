//! Core game types: sides, squares, tokens, moves, errors, state, RNG.
//!
//! These types carry no rule logic. The board, the resolver and the turn
//! controller are built on top of them.

pub mod action;
pub mod constants;
pub mod error;
pub mod rng;
pub mod side;
pub mod square;
pub mod state;
pub mod token;

pub use action::{Move, MoveRecord};
pub use error::{EngineError, InvalidMove};
pub use rng::GameRng;
pub use side::{Score, Side, SideMap};
pub use square::{Direction, Square};
pub use state::{round_for_move, EndReason, GamePhase, GameResult, GameSnapshot};
pub use token::{Pile, Token, TokenKind};
