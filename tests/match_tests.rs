//! Match runner and game log integration tests.

use o_an_quan::agents::{GreedyAgent, PlayerKind, RandomAgent, ScriptedAgent};
use o_an_quan::config::MatchConfig;
use o_an_quan::core::{Direction, GameRng, Move, Side, Square};
use o_an_quan::play::{GameLog, LogFormat, MatchRunner};
use o_an_quan::rules::{ExtendedRule, ExtendedRuleSet};

// =============================================================================
// Runner
// =============================================================================

/// Every game in a match ends with a recorded result.
#[test]
fn test_match_tallies_every_game() {
    let config = MatchConfig::default()
        .with_games(5)
        .with_seed(2024)
        .with_players(PlayerKind::Greedy, PlayerKind::Random);
    let summary = MatchRunner::new(config).run_match().unwrap();

    assert_eq!(summary.games(), 5);
    assert_eq!(summary.wins[Side::A] + summary.wins[Side::B] + summary.draws, 5);
    for log in &summary.logs {
        assert!(log.outcome().is_some());
        assert_eq!(log.player_a, "greedy");
        assert_eq!(log.player_b, "random");
        assert!(log.turns.len() <= 24);
    }
}

/// Different master seeds give different games.
#[test]
fn test_seeds_change_games() {
    let run = |seed| {
        MatchRunner::new(MatchConfig::default().with_games(2).with_seed(seed))
            .run_match()
            .unwrap()
            .logs
    };
    let first = run(1);
    assert_eq!(first, run(1));
    assert_ne!(first, run(2));
}

/// Logged moves alternate sides starting with A.
#[test]
fn test_turns_alternate() {
    let runner = MatchRunner::new(MatchConfig::default());
    let mut a = RandomAgent::new(GameRng::new(5));
    let mut b = GreedyAgent::new(ExtendedRuleSet::none());
    let log = runner.run_game(&mut a, &mut b, 5).unwrap();

    for (i, record) in log.turns.iter().enumerate() {
        let expected = if i % 2 == 0 { Side::A } else { Side::B };
        assert_eq!(record.side, expected);
    }
}

/// A scripted opening is replayed exactly.
#[test]
fn test_scripted_opening_is_logged() {
    let opening = Move::new(Square::A5, Direction::Clockwise);
    let reply = Move::new(Square::B3, Direction::Clockwise);
    let runner = MatchRunner::new(MatchConfig::default().with_max_moves(2));
    let mut a = ScriptedAgent::new([opening]);
    let mut b = ScriptedAgent::new([reply]);

    // Two moves are played, then the cap stops the game.
    let err = runner.run_game(&mut a, &mut b, 0).unwrap_err();
    assert_eq!(err, o_an_quan::core::EngineError::MoveLimit { moves: 2 });
}

// =============================================================================
// Logs
// =============================================================================

/// Logs written in either format read back identically.
#[test]
fn test_logs_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let rules = ExtendedRuleSet::none()
        .with(ExtendedRule::ImmatureMandarin)
        .with(ExtendedRule::EarlyGameRestriction);
    let config = MatchConfig::default().with_games(2).with_seed(8).with_rules(rules);
    let summary = MatchRunner::new(config).run_match().unwrap();

    for (log, format) in summary.logs.iter().zip([LogFormat::Json, LogFormat::Bincode]) {
        let path = log.write(dir.path(), format).unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), log.file_name(format));

        let back = GameLog::read(&path).unwrap();
        assert_eq!(&back, log);
        assert_eq!(back.rules, rules);
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

/// Config files drive the runner the same way as builder calls.
#[test]
fn test_config_file_drives_match() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match.toml");
    std::fs::write(
        &path,
        "games = 2\nseed = 3\nextended_rules = [\"E4\"]\nplayer_b = \"greedy\"\n",
    )
    .unwrap();

    let from_file = MatchRunner::new(MatchConfig::from_file(&path).unwrap()).run_match().unwrap();
    let built = MatchRunner::new(
        MatchConfig::default()
            .with_games(2)
            .with_seed(3)
            .with_rules(ExtendedRuleSet::none().with(ExtendedRule::TwoEmptyCapture))
            .with_players(PlayerKind::Random, PlayerKind::Greedy),
    )
    .run_match()
    .unwrap();

    assert_eq!(from_file.logs, built.logs);
}
