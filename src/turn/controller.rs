//! Turn sequencing around the move resolver.
//!
//! The controller owns the board, both scores, the round counter and the
//! phase. Each request is validated against the current state before
//! anything changes; a resolved move is committed in one step.

use im::Vector;
use tracing::{info, instrument, warn};

use crate::board::Board;
use crate::core::constants::{MAX_ROUNDS, RESTORE_COST, WINNING_SCORE};
use crate::core::{
    round_for_move, EndReason, EngineError, GamePhase, GameResult, GameSnapshot, InvalidMove, Move,
    MoveRecord, Score, Side, Square, Token,
};
use crate::rules::{ExtendedRuleSet, MoveResolver};

/// Result of a restore-peasants check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restoration {
    /// False when the check ended the game.
    pub continues: bool,

    /// Human-readable note when something happened.
    pub message: Option<String>,
}

/// Result of an accepted move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The resolved move as stored in the history.
    pub record: MoveRecord,

    /// Neither store holds a mandarin after the move.
    pub both_mandarins_captured: bool,

    /// Phase after the move.
    pub phase: GamePhase,
}

/// One game of Ô Ăn Quan.
///
/// ## Example
///
/// ```
/// use o_an_quan::core::{Direction, GamePhase, Move, Side, Square};
/// use o_an_quan::rules::ExtendedRuleSet;
/// use o_an_quan::turn::TurnController;
///
/// let mut game = TurnController::new();
/// let outcome = game
///     .apply_move(Side::A, Move::new(Square::A3, Direction::Clockwise), ExtendedRuleSet::none())
///     .unwrap();
///
/// assert_eq!(outcome.phase, GamePhase::AwaitingMove(Side::B));
/// assert_eq!(game.round(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TurnController {
    board: Board,
    score: Score,
    round: u32,
    active: Side,
    phase: GamePhase,
    history: Vector<MoveRecord>,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnController {
    /// A fresh game: opening layout, zero scores, round 0, side A to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            score: Score::default(),
            round: 0,
            active: Side::A,
            phase: GamePhase::AwaitingMove(Side::A),
            history: Vector::new(),
        }
    }

    /// Resume a game from a snapshot. History starts empty.
    #[must_use]
    pub fn from_snapshot(snapshot: GameSnapshot) -> Self {
        Self {
            board: snapshot.board,
            score: snapshot.score,
            round: snapshot.round,
            active: snapshot.active_side,
            phase: snapshot.phase,
            history: Vector::new(),
        }
    }

    /// Start over from the opening layout.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn active_side(&self) -> Side {
        self.active
    }

    #[must_use]
    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Moves played so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Field squares `side` may sow from.
    #[must_use]
    pub fn available_origins(&self, side: Side) -> Vec<Square> {
        self.board.available_origins(side)
    }

    /// Read-only copy of the game.
    #[must_use]
    pub fn current_state(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            score: self.score,
            round: self.round,
            active_side: self.active,
            phase: self.phase.clone(),
        }
    }

    // === Commands ===

    /// Refill `side`'s field if it is empty.
    ///
    /// With at least 5 points the side pays 5 and gets one peasant on each
    /// field square. With fewer the game ends and the higher score wins.
    #[instrument(skip(self), fields(score = self.score[side]))]
    pub fn restore_peasants(&mut self, side: Side) -> Result<Restoration, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if !self.board.field_is_empty(side) {
            return Ok(Restoration {
                continues: true,
                message: None,
            });
        }

        if self.score[side] >= RESTORE_COST {
            self.score[side] -= RESTORE_COST;
            for square in Square::fields(side) {
                self.board.push(square, Token::peasant(side));
            }
            let message = format!(
                "side {} paid {} points to restore its field ({} left)",
                side, RESTORE_COST, self.score[side]
            );
            info!(%side, remaining = self.score[side], "peasants restored");
            return Ok(Restoration {
                continues: true,
                message: Some(message),
            });
        }

        let message = format!(
            "side {} has an empty field and only {} points, not enough to restore",
            side, self.score[side]
        );
        self.finish(EndReason::CannotRestore, message.clone());
        Ok(Restoration {
            continues: false,
            message: Some(message),
        })
    }

    /// Play `mv` for `side` under `rules`.
    ///
    /// Rejected requests leave the game unchanged.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn apply_move(
        &mut self,
        side: Side,
        mv: Move,
        rules: ExtendedRuleSet,
    ) -> Result<MoveOutcome, EngineError> {
        if self.is_over() {
            warn!("move after game over");
            return Err(EngineError::GameOver);
        }
        if side != self.active {
            warn!(active = %self.active, "move out of turn");
            return Err(InvalidMove::NotYourTurn { side }.into());
        }
        if let Err(err) = MoveResolver::validate(&self.board, side, mv) {
            warn!(error = %err, "move rejected");
            return Err(err.into());
        }

        let round = round_for_move(self.round, side);
        let resolution =
            MoveResolver::new(rules, round).resolve(&self.board, &self.score, side, mv)?;

        self.board = resolution.board;
        self.score = resolution.score;
        self.round = round;

        let record = MoveRecord {
            side,
            mv,
            round,
            events: resolution.events,
            score: self.score,
        };
        self.history.push_back(record.clone());

        match self.termination(resolution.both_mandarins_captured) {
            Some(reason) => {
                let message = format!(
                    "{} after round {} (A {} : B {})",
                    reason, self.round, self.score[Side::A], self.score[Side::B]
                );
                self.finish(reason, message);
            }
            None => {
                self.active = side.opponent();
                self.phase = GamePhase::AwaitingMove(self.active);
            }
        }

        Ok(MoveOutcome {
            record,
            both_mandarins_captured: resolution.both_mandarins_captured,
            phase: self.phase.clone(),
        })
    }

    /// First satisfied end condition, in priority order.
    fn termination(&self, both_mandarins_captured: bool) -> Option<EndReason> {
        if both_mandarins_captured {
            Some(EndReason::BothMandarinsCaptured)
        } else if Side::ALL.iter().any(|&s| self.score[s] >= WINNING_SCORE) {
            Some(EndReason::ScoreThreshold)
        } else if self.round >= MAX_ROUNDS {
            Some(EndReason::RoundLimit)
        } else {
            None
        }
    }

    fn finish(&mut self, reason: EndReason, message: String) {
        let result = GameResult::from_score(&self.score);
        info!(%result, %reason, round = self.round, "game over");
        self.phase = GamePhase::GameOver {
            result,
            reason,
            message,
        };
    }
}
