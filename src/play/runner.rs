//! Whole games between two agents.
//!
//! Each turn the runner asks the controller to restore the active side's
//! field if needed, hands the snapshot and legal origins to that side's
//! agent, and applies the returned move. A game that has not ended after
//! `max_moves` moves is abandoned with `EngineError::MoveLimit`.

use tracing::{debug, info, instrument, warn};

use super::log::GameLog;
use crate::agents::Agent;
use crate::config::MatchConfig;
use crate::core::{EngineError, GameResult, GameRng, Side, SideMap};
use crate::turn::TurnController;

/// Tally of a finished match.
#[derive(Clone, Debug, Default)]
pub struct MatchSummary {
    pub logs: Vec<GameLog>,
    pub wins: SideMap<usize>,
    pub draws: usize,
}

impl MatchSummary {
    fn record(&mut self, log: GameLog) {
        match log.final_state.phase.result() {
            Some(GameResult::Winner(side)) => self.wins[side] += 1,
            Some(GameResult::Draw) => self.draws += 1,
            None => {}
        }
        self.logs.push(log);
    }

    #[must_use]
    pub fn games(&self) -> usize {
        self.logs.len()
    }
}

/// Plays games under one match configuration.
///
/// ## Example
///
/// ```
/// use o_an_quan::agents::{GreedyAgent, RandomAgent};
/// use o_an_quan::config::MatchConfig;
/// use o_an_quan::core::GameRng;
/// use o_an_quan::play::MatchRunner;
/// use o_an_quan::rules::ExtendedRuleSet;
///
/// let runner = MatchRunner::new(MatchConfig::default());
/// let mut a = RandomAgent::new(GameRng::new(1));
/// let mut b = GreedyAgent::new(ExtendedRuleSet::none());
///
/// let log = runner.run_game(&mut a, &mut b, 1).unwrap();
/// assert!(log.outcome().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play one game to completion. `seed` is recorded in the log.
    #[instrument(
        skip(self, agent_a, agent_b),
        fields(a = agent_a.name(), b = agent_b.name())
    )]
    pub fn run_game(
        &self,
        agent_a: &mut dyn Agent,
        agent_b: &mut dyn Agent,
        seed: u64,
    ) -> Result<GameLog, EngineError> {
        let rules = self.config.extended_rules;
        let mut game = TurnController::new();
        let mut turns = Vec::new();
        let mut notes = Vec::new();

        while !game.is_over() {
            if turns.len() >= self.config.max_moves {
                warn!(moves = turns.len(), "game abandoned at move cap");
                return Err(EngineError::MoveLimit { moves: turns.len() });
            }

            let side = game.active_side();
            let restoration = game.restore_peasants(side)?;
            notes.extend(restoration.message);
            if !restoration.continues {
                break;
            }

            let origins = game.available_origins(side);
            let snapshot = game.current_state();
            let agent: &mut dyn Agent = match side {
                Side::A => &mut *agent_a,
                Side::B => &mut *agent_b,
            };
            let mv = agent
                .choose_move(&snapshot, &origins)
                .ok_or(EngineError::NoMove { side })?;
            debug!(%side, %mv, agent = agent.name(), "agent move");

            let outcome = game.apply_move(side, mv, rules)?;
            turns.push(outcome.record);
        }

        let final_state = game.current_state();
        info!(
            moves = turns.len(),
            score_a = final_state.score[Side::A],
            score_b = final_state.score[Side::B],
            "game finished"
        );

        Ok(GameLog {
            index: 0,
            seed,
            rules,
            player_a: agent_a.name().to_string(),
            player_b: agent_b.name().to_string(),
            turns,
            notes,
            final_state,
        })
    }

    /// Play `config.games` games with agents built from the configured kinds.
    ///
    /// Each game forks its own stream from the master seed, so game `n` is
    /// reproducible on its own.
    #[instrument(skip(self), fields(games = self.config.games, seed = self.config.seed))]
    pub fn run_match(&self) -> Result<MatchSummary, EngineError> {
        let rules = self.config.extended_rules;
        let mut master = GameRng::new(self.config.seed);
        let mut summary = MatchSummary::default();

        for index in 0..self.config.games {
            let mut game_rng = master.fork();
            let seed = game_rng.seed();
            let mut agent_a = self.config.player_a.build(game_rng.fork(), rules);
            let mut agent_b = self.config.player_b.build(game_rng.fork(), rules);

            let mut log = self.run_game(agent_a.as_mut(), agent_b.as_mut(), seed)?;
            log.index = index;
            summary.record(log);
        }

        info!(
            wins_a = summary.wins[Side::A],
            wins_b = summary.wins[Side::B],
            draws = summary.draws,
            "match finished"
        );
        Ok(summary)
    }
}
