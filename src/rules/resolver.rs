//! Move resolution: sowing, forced re-sowing, and chain captures.
//!
//! ## Algorithm
//!
//! 1. Pick up every peasant on the origin and drop them one by one on the
//!    following squares in the chosen direction.
//! 2. Look at the square after the last drop (`next`):
//!    - `next` holds tokens: pick up its peasants (mandarins stay) and sow
//!      them onward. Without E2 the move ends after this one re-sow.
//!    - `next` is empty: the square after it is the capture candidate. If it
//!      holds tokens and passes the active gates, capture it, award the
//!      points to the mover, and repeat from the captured square.
//! 3. Stop when neither case applies.
//!
//! Resolution works on a copy of the board, so a rejected or failed move
//! leaves the caller's state untouched.

use tracing::{debug, error, instrument};

use super::event::MoveEvent;
use super::extended::{ExtendedRule, ExtendedRuleSet};
use crate::board::{next_square, Board};
use crate::core::constants::{
    EARLY_GAME_ROUNDS, MATURE_MANDARIN_TOKENS, MAX_RESOLUTION_ITERATIONS,
};
use crate::core::token::pile_value;
use crate::core::{Direction, EngineError, InvalidMove, Move, Pile, Score, Side, Square};

/// The full effect of one resolved move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Board after the move.
    pub board: Board,

    /// Scores after the move.
    pub score: Score,

    /// Ordered effect trace.
    pub events: Vec<MoveEvent>,

    /// Neither store holds a mandarin any more.
    pub both_mandarins_captured: bool,
}

impl Resolution {
    /// Whether the move captured anything.
    #[must_use]
    pub fn captured_any(&self) -> bool {
        self.events.iter().any(MoveEvent::is_capture)
    }
}

/// Resolves moves under a fixed rule set and round.
///
/// ## Example
///
/// ```
/// use o_an_quan::board::Board;
/// use o_an_quan::core::{Direction, Move, Score, Side, Square};
/// use o_an_quan::rules::{ExtendedRuleSet, MoveResolver};
///
/// let board = Board::new();
/// let resolver = MoveResolver::new(ExtendedRuleSet::none(), 1);
/// let resolution = resolver
///     .resolve(&board, &Score::default(), Side::A, Move::new(Square::A1, Direction::Clockwise))
///     .unwrap();
///
/// assert_eq!(resolution.board.total_tokens(), board.total_tokens());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MoveResolver {
    rules: ExtendedRuleSet,
    round: u32,
    iteration_limit: usize,
}

/// Whether a forced re-sow is still allowed in the current move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Open,
    /// Entered after the default single re-sow when E5 is active.
    CapturesOnly,
}

enum Step {
    Continue(Square, Mode),
    Stop,
}

impl MoveResolver {
    /// Create a resolver for the given rules and round counter.
    #[must_use]
    pub fn new(rules: ExtendedRuleSet, round: u32) -> Self {
        Self {
            rules,
            round,
            iteration_limit: MAX_RESOLUTION_ITERATIONS,
        }
    }

    /// Override the safety cap on loop iterations.
    #[must_use]
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = limit;
        self
    }

    /// Check that `mover` may sow from `mv.origin` on `board`.
    pub fn validate(board: &Board, mover: Side, mv: Move) -> Result<(), InvalidMove> {
        let square = mv.origin;
        if square.is_store() {
            return Err(InvalidMove::StoreOrigin { square });
        }
        if square.side() != mover {
            return Err(InvalidMove::NotOwned { square, side: mover });
        }
        if board.peasant_count(square) == 0 {
            return Err(InvalidMove::EmptyOrigin { square });
        }
        Ok(())
    }

    /// Resolve `mv` played by `mover`.
    ///
    /// `board` and `score` are not modified; the new values are returned in
    /// the `Resolution`.
    #[instrument(
        level = "debug",
        skip(self, board, score),
        fields(round = self.round, rules = %self.rules)
    )]
    pub fn resolve(
        &self,
        board: &Board,
        score: &Score,
        mover: Side,
        mv: Move,
    ) -> Result<Resolution, EngineError> {
        Self::validate(board, mover, mv)?;

        let mut work = Sowing {
            board: board.clone(),
            score: *score,
            events: Vec::new(),
            mover,
            direction: mv.direction,
        };

        let tokens = work.board.take_peasants(mv.origin);
        work.pickup(mv.origin, &tokens);
        let mut current = work.sow(mv.origin, tokens);
        let mut mode = Mode::Open;
        let mut iterations = 0;

        loop {
            if iterations >= self.iteration_limit {
                error!(iterations, %current, "resolution loop did not settle");
                return Err(EngineError::ResolutionLimit { iterations });
            }
            iterations += 1;

            match self.step(&mut work, current, mode) {
                Step::Continue(square, next_mode) => {
                    current = square;
                    mode = next_mode;
                }
                Step::Stop => break,
            }
        }

        debug!(iterations, events = work.events.len(), "move resolved");
        let both_mandarins_captured = work.board.both_mandarins_captured();
        Ok(Resolution {
            board: work.board,
            score: work.score,
            events: work.events,
            both_mandarins_captured,
        })
    }

    fn step(&self, work: &mut Sowing, current: Square, mode: Mode) -> Step {
        let next = next_square(current, work.direction);

        if !work.board.is_empty(next) {
            if mode == Mode::CapturesOnly {
                debug!(%next, "occupied square ends capture-only chain");
                return Step::Stop;
            }

            let tokens = work.board.take_peasants(next);
            if tokens.is_empty() {
                debug!(%next, "only a mandarin ahead, nothing to re-sow");
                return Step::Stop;
            }

            work.pickup(next, &tokens);
            let landing = work.sow(next, tokens);
            debug!(%next, %landing, "forced re-sow");

            return if self.rules.contains(ExtendedRule::ForcedRedistribution) {
                Step::Continue(landing, Mode::Open)
            } else if self.rules.contains(ExtendedRule::ForcedCaptureChain) {
                Step::Continue(landing, Mode::CapturesOnly)
            } else {
                Step::Stop
            };
        }

        match self.capture_candidate(&work.board, next, work.direction) {
            Some(target) if self.may_capture(&work.board, target) => {
                work.capture(target);
                Step::Continue(target, mode)
            }
            Some(target) => {
                debug!(%target, "capture blocked by extended rule");
                Step::Stop
            }
            None => Step::Stop,
        }
    }

    /// The first occupied square after the empty square `gap`, looking one
    /// square ahead (two with E4).
    fn capture_candidate(
        &self,
        board: &Board,
        gap: Square,
        direction: Direction,
    ) -> Option<Square> {
        let after = next_square(gap, direction);
        if !board.is_empty(after) {
            return Some(after);
        }
        if self.rules.contains(ExtendedRule::TwoEmptyCapture) {
            let further = next_square(after, direction);
            if !board.is_empty(further) {
                return Some(further);
            }
        }
        None
    }

    /// Gate checks for capturing `target`. Only stores that still hold their
    /// mandarin are gated.
    fn may_capture(&self, board: &Board, target: Square) -> bool {
        if !(target.is_store() && board.has_mandarin(target)) {
            return true;
        }
        self.rules.iter().all(|rule| match rule {
            ExtendedRule::ImmatureMandarin => board.count(target) >= MATURE_MANDARIN_TOKENS,
            ExtendedRule::EarlyGameRestriction => self.round >= EARLY_GAME_ROUNDS,
            ExtendedRule::ForcedRedistribution
            | ExtendedRule::TwoEmptyCapture
            | ExtendedRule::ForcedCaptureChain => true,
        })
    }
}

/// Working copy of the game while a move resolves.
struct Sowing {
    board: Board,
    score: Score,
    events: Vec<MoveEvent>,
    mover: Side,
    direction: Direction,
}

impl Sowing {
    fn pickup(&mut self, square: Square, tokens: &Pile) {
        self.events.push(MoveEvent::Pickup {
            square,
            tokens: tokens.to_vec(),
        });
    }

    /// Drop `tokens` one per square after `from`; returns the last square.
    fn sow(&mut self, from: Square, tokens: Pile) -> Square {
        let mut at = from;
        for token in tokens {
            let to = next_square(at, self.direction);
            self.board.push(to, token);
            self.events.push(MoveEvent::Drop { from: at, to, token });
            at = to;
        }
        at
    }

    fn capture(&mut self, square: Square) {
        let tokens = self.board.take_all(square);
        let points = pile_value(&tokens);
        self.score[self.mover] += points;
        debug!(%square, points, mover = %self.mover, "capture");

        self.events.push(MoveEvent::Capture {
            square,
            side: square.side(),
            tokens: tokens.to_vec(),
        });
        self.events.push(MoveEvent::ScoreUpdate { score: self.score });
    }
}

/// Resolve a single move; see [`MoveResolver::resolve`].
pub fn resolve(
    board: &Board,
    score: &Score,
    mover: Side,
    mv: Move,
    rules: ExtendedRuleSet,
    round: u32,
) -> Result<Resolution, EngineError> {
    MoveResolver::new(rules, round).resolve(board, score, mover, mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Token;

    fn peasants(side: Side, n: usize) -> Vec<Token> {
        vec![Token::peasant(side); n]
    }

    fn board_with(entries: &[(Square, Vec<Token>)]) -> Board {
        let mut board = Board::empty();
        for (square, tokens) in entries {
            board.set(*square, tokens.iter().copied());
        }
        board
    }

    fn rules(list: &[ExtendedRule]) -> ExtendedRuleSet {
        list.iter().copied().collect()
    }

    fn cw(origin: Square) -> Move {
        Move::new(origin, Direction::Clockwise)
    }

    fn ccw(origin: Square) -> Move {
        Move::new(origin, Direction::CounterClockwise)
    }

    fn play(board: &Board, mover: Side, mv: Move, set: ExtendedRuleSet, round: u32) -> Resolution {
        MoveResolver::new(set, round)
            .resolve(board, &Score::default(), mover, mv)
            .unwrap()
    }

    fn base(board: &Board, mover: Side, mv: Move, round: u32) -> Resolution {
        play(board, mover, mv, ExtendedRuleSet::none(), round)
    }

    #[test]
    fn test_opening_move_sows_onto_store() {
        let board = Board::new();
        let res = base(&board, Side::A, cw(Square::A5), 1);

        assert_eq!(
            res.events[1],
            MoveEvent::Drop {
                from: Square::A5,
                to: Square::QB,
                token: Token::peasant(Side::A)
            }
        );
        assert_eq!(res.score, Score::default());
        assert!(!res.captured_any());
        assert_eq!(res.board.total_tokens(), 52);
        assert!(res.board.is_empty(Square::A5));
    }

    #[test]
    fn test_opening_move_forced_resow_stops_once() {
        // A5 lands on B2, B1 is occupied: one re-sow from B1 to A4, then stop.
        let res = base(&Board::new(), Side::A, cw(Square::A5), 1);

        assert_eq!(res.events.len(), 12);
        assert!(res.board.is_empty(Square::B1));
        let qb = [Token::mandarin(Side::B), Token::peasant(Side::A)];
        let qa = [Token::mandarin(Side::A), Token::peasant(Side::B)];
        assert_eq!(res.board.tokens(Square::QB), &qb);
        assert_eq!(res.board.tokens(Square::QA), &qa);
        assert_eq!(res.board.count(Square::A4), 6);
    }

    #[test]
    fn test_capture_across_one_empty_square() {
        let board = board_with(&[
            (Square::QA, vec![Token::mandarin(Side::A)]),
            (Square::QB, vec![Token::mandarin(Side::B)]),
            (Square::A1, peasants(Side::A, 1)),
            (Square::B2, peasants(Side::B, 3)),
        ]);
        let res = base(&board, Side::A, ccw(Square::A1), 3);

        assert_eq!(res.score, Score::new(3, 0));
        assert_eq!(
            res.events,
            vec![
                MoveEvent::Pickup {
                    square: Square::A1,
                    tokens: peasants(Side::A, 1),
                },
                MoveEvent::Drop {
                    from: Square::A1,
                    to: Square::QA,
                    token: Token::peasant(Side::A),
                },
                MoveEvent::Capture {
                    square: Square::B2,
                    side: Side::B,
                    tokens: peasants(Side::B, 3),
                },
                MoveEvent::ScoreUpdate {
                    score: Score::new(3, 0),
                },
            ]
        );
        assert!(res.board.is_empty(Square::B2));
    }

    #[test]
    fn test_points_go_to_mover_not_token_owner() {
        let board = board_with(&[
            (Square::QA, vec![Token::mandarin(Side::A)]),
            (Square::B1, peasants(Side::B, 1)),
            (Square::A2, vec![Token::peasant(Side::A), Token::peasant(Side::B)]),
        ]);
        let res = base(&board, Side::B, cw(Square::B1), 4);

        assert_eq!(res.score, Score::new(0, 2));
    }

    #[test]
    fn test_chain_capture() {
        let board = board_with(&[
            (Square::QA, vec![Token::mandarin(Side::A)]),
            (Square::A1, peasants(Side::A, 1)),
            (Square::B2, peasants(Side::B, 3)),
            (Square::B4, peasants(Side::B, 2)),
        ]);
        let res = base(&board, Side::A, ccw(Square::A1), 3);

        let captured: Vec<_> = res
            .events
            .iter()
            .filter_map(|e| match e {
                MoveEvent::Capture { square, .. } => Some(*square),
                _ => None,
            })
            .collect();
        assert_eq!(captured, vec![Square::B2, Square::B4]);
        assert_eq!(res.score[Side::A], 5);
    }

    #[test]
    fn test_immature_mandarin_blocks_capture() {
        let board = board_with(&[
            (Square::QA, vec![Token::mandarin(Side::A)]),
            (Square::A3, peasants(Side::A, 1)),
            (Square::QB, {
                let mut t = vec![Token::mandarin(Side::B)];
                t.extend(peasants(Side::B, 3));
                t
            }),
        ]);

        let set = rules(&[ExtendedRule::ImmatureMandarin]);
        let gated = play(&board, Side::A, cw(Square::A3), set, 5);
        assert_eq!(gated.score, Score::default());
        assert_eq!(gated.board.count(Square::QB), 4);

        let open = base(&board, Side::A, cw(Square::A3), 5);
        assert_eq!(open.score, Score::new(8, 0));
        assert!(open.board.is_empty(Square::QB));
    }

    #[test]
    fn test_mature_mandarin_is_capturable() {
        let mut store = vec![Token::mandarin(Side::B)];
        store.extend(peasants(Side::A, 4));
        let board = board_with(&[(Square::A3, peasants(Side::A, 1)), (Square::QB, store)]);

        let set = rules(&[ExtendedRule::ImmatureMandarin]);
        let res = play(&board, Side::A, cw(Square::A3), set, 5);
        assert_eq!(res.score, Score::new(9, 0));
    }

    #[test]
    fn test_early_game_restriction() {
        let board = board_with(&[
            (Square::A3, peasants(Side::A, 1)),
            (Square::QB, vec![Token::mandarin(Side::B)]),
        ]);
        let set = rules(&[ExtendedRule::EarlyGameRestriction]);

        let early = play(&board, Side::A, cw(Square::A3), set, 2);
        assert_eq!(early.score, Score::default());
        assert!(early.board.has_mandarin(Square::QB));

        let later = play(&board, Side::A, cw(Square::A3), set, 3);
        assert_eq!(later.score, Score::new(5, 0));
    }

    #[test]
    fn test_gates_ignore_store_without_mandarin() {
        let board = board_with(&[
            (Square::A3, peasants(Side::A, 1)),
            (Square::QB, peasants(Side::B, 2)),
        ]);
        let set = rules(&[ExtendedRule::ImmatureMandarin, ExtendedRule::EarlyGameRestriction]);

        let res = play(&board, Side::A, cw(Square::A3), set, 1);
        assert_eq!(res.score, Score::new(2, 0));
    }

    #[test]
    fn test_both_mandarins_captured_flag() {
        let mut store = vec![Token::mandarin(Side::B)];
        store.extend(peasants(Side::B, 4));
        let board = board_with(&[
            (Square::A3, peasants(Side::A, 1)),
            (Square::QB, store),
            (Square::B1, peasants(Side::B, 2)),
        ]);

        let res = base(&board, Side::A, cw(Square::A3), 5);
        assert!(res.both_mandarins_captured);
        assert_eq!(res.board.count(Square::B1), 2);
    }

    #[test]
    fn test_forced_redistribution_keeps_sowing() {
        let board = board_with(&[
            (Square::QA, vec![Token::mandarin(Side::A)]),
            (Square::A1, peasants(Side::A, 1)),
            (Square::A3, peasants(Side::A, 2)),
            (Square::QB, vec![Token::mandarin(Side::B), Token::peasant(Side::B)]),
            (Square::B3, peasants(Side::B, 2)),
        ]);

        let single = base(&board, Side::A, cw(Square::A1), 5);
        assert_eq!(single.score, Score::default());
        assert_eq!(single.board.count(Square::QB), 2);

        let set = rules(&[ExtendedRule::ForcedRedistribution]);
        let forced = play(&board, Side::A, cw(Square::A1), set, 5);
        assert_eq!(forced.score, Score::new(2, 0));
        assert_eq!(forced.board.tokens(Square::QB), &[Token::mandarin(Side::B)]);
        assert_eq!(forced.board.count(Square::B5), 1);
    }

    #[test]
    fn test_lone_mandarin_ends_resow() {
        let board = board_with(&[
            (Square::A1, peasants(Side::A, 1)),
            (Square::A3, peasants(Side::A, 2)),
            (Square::QB, vec![Token::mandarin(Side::B)]),
        ]);
        let set = rules(&[ExtendedRule::ForcedRedistribution]);
        let res = play(&board, Side::A, cw(Square::A1), set, 5);

        assert_eq!(res.events.len(), 5);
        assert_eq!(res.board.tokens(Square::QB), &[Token::mandarin(Side::B)]);
    }

    #[test]
    fn test_two_empty_capture() {
        let board = board_with(&[
            (Square::QB, vec![Token::mandarin(Side::B)]),
            (Square::A1, peasants(Side::A, 1)),
            (Square::A5, peasants(Side::A, 2)),
        ]);

        let narrow = base(&board, Side::A, cw(Square::A1), 5);
        assert_eq!(narrow.score, Score::default());

        let set = rules(&[ExtendedRule::TwoEmptyCapture]);
        let wide = play(&board, Side::A, cw(Square::A1), set, 5);
        assert_eq!(wide.score, Score::new(2, 0));
        assert!(wide.board.is_empty(Square::A5));
    }

    #[test]
    fn test_forced_capture_chain_after_resow() {
        let board = board_with(&[
            (Square::QA, vec![Token::mandarin(Side::A)]),
            (Square::QB, vec![Token::mandarin(Side::B)]),
            (Square::A1, peasants(Side::A, 1)),
            (Square::A3, peasants(Side::A, 1)),
        ]);

        let single = base(&board, Side::A, cw(Square::A1), 5);
        assert_eq!(single.score, Score::default());

        let set = rules(&[ExtendedRule::ForcedCaptureChain]);
        let chained = play(&board, Side::A, cw(Square::A1), set, 5);
        assert_eq!(chained.score, Score::new(5, 0));
        assert!(!chained.board.has_mandarin(Square::QB));
    }

    #[test]
    fn test_capture_only_mode_does_not_resow() {
        let board = board_with(&[
            (Square::A1, peasants(Side::A, 1)),
            (Square::A3, peasants(Side::A, 1)),
            (Square::A5, peasants(Side::A, 1)),
        ]);
        let set = rules(&[ExtendedRule::ForcedCaptureChain]);
        let res = play(&board, Side::A, cw(Square::A1), set, 5);

        assert_eq!(res.events.len(), 4);
        assert_eq!(res.board.count(Square::A5), 1);
    }

    #[test]
    fn test_forced_redistribution_overrides_capture_chain() {
        // After the first re-sow lands on A4, A5 is occupied: E2 sows it on,
        // capture-only mode would stop there.
        let board = board_with(&[
            (Square::A1, peasants(Side::A, 1)),
            (Square::A3, peasants(Side::A, 1)),
            (Square::A5, peasants(Side::A, 1)),
        ]);
        let chain_only = rules(&[ExtendedRule::ForcedCaptureChain]);
        let redistribute = rules(&[ExtendedRule::ForcedRedistribution]);
        let both = rules(&[ExtendedRule::ForcedRedistribution, ExtendedRule::ForcedCaptureChain]);

        let chained = play(&board, Side::A, cw(Square::A1), chain_only, 5);
        let combined = play(&board, Side::A, cw(Square::A1), both, 5);

        assert_eq!(combined, play(&board, Side::A, cw(Square::A1), redistribute, 5));
        assert_ne!(combined.events, chained.events);
        assert_eq!(combined.events.len(), 6);
        assert_eq!(
            combined.events[4],
            MoveEvent::Pickup {
                square: Square::A5,
                tokens: peasants(Side::A, 1),
            }
        );
        assert!(combined.board.is_empty(Square::A5));
        assert_eq!(combined.board.tokens(Square::QB), &[Token::peasant(Side::A)]);
    }

    #[test]
    fn test_rejects_store_origin() {
        let err = MoveResolver::validate(&Board::new(), Side::A, cw(Square::QA)).unwrap_err();
        assert_eq!(err, InvalidMove::StoreOrigin { square: Square::QA });
    }

    #[test]
    fn test_rejects_opponent_origin() {
        let err = MoveResolver::validate(&Board::new(), Side::A, cw(Square::B2)).unwrap_err();
        assert_eq!(
            err,
            InvalidMove::NotOwned {
                square: Square::B2,
                side: Side::A
            }
        );
    }

    #[test]
    fn test_rejects_empty_origin() {
        let board = Board::empty();
        let result = resolve(
            &board,
            &Score::default(),
            Side::B,
            ccw(Square::B4),
            ExtendedRuleSet::all(),
            5,
        );
        assert_eq!(
            result.unwrap_err(),
            EngineError::InvalidMove(InvalidMove::EmptyOrigin { square: Square::B4 })
        );
    }

    #[test]
    fn test_iteration_limit_is_fatal() {
        let board = board_with(&[
            (Square::A1, peasants(Side::A, 1)),
            (Square::B2, peasants(Side::B, 3)),
        ]);
        let mv = ccw(Square::A1);

        let capped = MoveResolver::new(ExtendedRuleSet::none(), 3).with_iteration_limit(1);
        assert_eq!(
            capped.resolve(&board, &Score::default(), Side::A, mv).unwrap_err(),
            EngineError::ResolutionLimit { iterations: 1 }
        );

        let enough = MoveResolver::new(ExtendedRuleSet::none(), 3).with_iteration_limit(2);
        assert!(enough.resolve(&board, &Score::default(), Side::A, mv).is_ok());
    }
}
