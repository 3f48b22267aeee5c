//! Move resolution rules.
//!
//! - `extended`: optional rules E1..E5 and the rule set passed per move
//! - `resolver`: the sow / re-sow / capture loop
//! - `event`: the ordered effect trace a resolved move produces

pub mod event;
pub mod extended;
pub mod resolver;

pub use event::MoveEvent;
pub use extended::{ExtendedRule, ExtendedRuleSet};
pub use resolver::{resolve, MoveResolver, Resolution};
