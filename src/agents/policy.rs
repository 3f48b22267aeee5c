//! Move-selection policies.
//!
//! The engine never chooses moves itself. Agents look at a snapshot and the
//! list of legal origins and return a fully-formed `Move`:
//! - `RandomAgent`: uniform over origins and directions
//! - `GreedyAgent`: one-ply lookahead, maximizes points captured
//! - `ScriptedAgent`: replays a fixed list of moves

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::core::{round_for_move, Direction, GameRng, GameSnapshot, Move, Side, Square};
use crate::rules::{ExtendedRuleSet, MoveResolver};

/// Chooses moves for one side.
pub trait Agent: Send {
    /// Pick a move among `origins` (never empty when called by the runner).
    ///
    /// Returns `None` if the agent has nothing to play.
    fn choose_move(&mut self, snapshot: &GameSnapshot, origins: &[Square]) -> Option<Move>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Agent kinds selectable from configuration.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayerKind {
    #[default]
    Random,
    Greedy,
}

impl PlayerKind {
    /// Build an agent of this kind.
    #[must_use]
    pub fn build(self, rng: GameRng, rules: ExtendedRuleSet) -> Box<dyn Agent> {
        match self {
            PlayerKind::Random => Box::new(RandomAgent::new(rng)),
            PlayerKind::Greedy => Box::new(GreedyAgent::new(rules)),
        }
    }
}

// =============================================================================
// Random
// =============================================================================

/// Uniform random agent.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, _snapshot: &GameSnapshot, origins: &[Square]) -> Option<Move> {
        let origin = *self.rng.choose(origins)?;
        let direction = *self.rng.choose(&Direction::ALL)?;
        Some(Move::new(origin, direction))
    }

    fn name(&self) -> &str {
        "random"
    }
}

// =============================================================================
// Greedy
// =============================================================================

/// Plays the move that captures the most points this turn.
///
/// Ties keep the first candidate in `X1..X5`, clockwise-first order.
#[derive(Clone, Debug)]
pub struct GreedyAgent {
    rules: ExtendedRuleSet,
}

impl GreedyAgent {
    #[must_use]
    pub fn new(rules: ExtendedRuleSet) -> Self {
        Self { rules }
    }

    /// Points `side` would gain by playing `mv`; `None` if it cannot resolve.
    fn gain(&self, snapshot: &GameSnapshot, side: Side, mv: Move) -> Option<u32> {
        let round = round_for_move(snapshot.round, side);
        let resolution = MoveResolver::new(self.rules, round)
            .resolve(&snapshot.board, &snapshot.score, side, mv)
            .ok()?;
        Some(resolution.score[side] - snapshot.score[side])
    }
}

impl Agent for GreedyAgent {
    fn choose_move(&mut self, snapshot: &GameSnapshot, origins: &[Square]) -> Option<Move> {
        let side = snapshot.active_side;
        let mut best: Option<(u32, Move)> = None;

        for &origin in origins {
            for direction in Direction::ALL {
                let mv = Move::new(origin, direction);
                let Some(gain) = self.gain(snapshot, side, mv) else {
                    continue;
                };
                if best.map_or(true, |(top, _)| gain > top) {
                    best = Some((gain, mv));
                }
            }
        }

        best.map(|(_, mv)| mv)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

// =============================================================================
// Scripted
// =============================================================================

/// Replays moves in order, then stops.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    moves: VecDeque<Move>,
}

impl ScriptedAgent {
    #[must_use]
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// Moves not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Agent for ScriptedAgent {
    fn choose_move(&mut self, _snapshot: &GameSnapshot, _origins: &[Square]) -> Option<Move> {
        self.moves.pop_front()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
