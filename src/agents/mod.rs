//! Agents that pick moves for the match runner.

pub mod policy;

pub use policy::{Agent, GreedyAgent, PlayerKind, RandomAgent, ScriptedAgent};
