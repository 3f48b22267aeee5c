//! Match play: running games between agents and logging them.

pub mod log;
pub mod runner;

pub use log::{GameLog, LogError, LogFormat};
pub use runner::{MatchRunner, MatchSummary};
