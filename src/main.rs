//! o-an-quan command-line driver.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

use o_an_quan::config::MatchConfig;
use o_an_quan::core::{GamePhase, Side};
use o_an_quan::play::{GameLog, MatchRunner};
use o_an_quan::rules::{ExtendedRule, ExtendedRuleSet};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            games,
            seed,
            rules,
            player_a,
            player_b,
            log_dir,
            log_format,
            quiet,
        } => {
            let mut config = match config {
                Some(path) => MatchConfig::from_file(&path)?,
                None => MatchConfig::default(),
            };
            if let Some(games) = games {
                config.games = games;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if let Some(rules) = rules {
                config.extended_rules = rules.into_iter().collect();
            }
            if let Some(kind) = player_a {
                config.player_a = kind;
            }
            if let Some(kind) = player_b {
                config.player_b = kind;
            }
            if let Some(dir) = log_dir {
                config.log_dir = Some(dir);
            }
            if let Some(format) = log_format {
                config.log_format = format;
            }
            run_play(config, quiet)
        }
        Command::Rules { rules } => {
            print_rules(&rules);
            Ok(())
        }
        Command::Show { file } => run_show(&file),
    }
}

/// Play the configured match and report the results
#[instrument(skip(config), fields(games = config.games, rules = %config.extended_rules))]
fn run_play(config: MatchConfig, quiet: bool) -> Result<()> {
    config.validate()?;
    info!("Starting match");

    let runner = MatchRunner::new(config.clone());
    let summary = runner.run_match().context("match aborted")?;

    for log in &summary.logs {
        if !quiet {
            let (a, b) = (log.final_state.score[Side::A], log.final_state.score[Side::B]);
            let result = log
                .outcome()
                .map_or_else(|| "unfinished".to_string(), |(r, why)| format!("{r} ({why})"));
            println!(
                "game {:>3}  seed {:>20}  moves {:>3}  A {:>2} : B {:>2}  {}",
                log.index,
                log.seed,
                log.turns.len(),
                a,
                b,
                result
            );
        }
        if let Some(dir) = &config.log_dir {
            log.write(dir, config.log_format)?;
        }
    }

    println!(
        "{} games [{}]: A ({}) won {}, B ({}) won {}, {} drawn",
        summary.games(),
        display_rules(config.extended_rules),
        config.player_a,
        summary.wins[Side::A],
        config.player_b,
        summary.wins[Side::B],
        summary.draws
    );
    Ok(())
}

fn print_rules(selected: &[ExtendedRule]) {
    let rules: Vec<ExtendedRule> = if selected.is_empty() {
        ExtendedRule::iter().collect()
    } else {
        selected.to_vec()
    };
    for rule in rules {
        println!("{}  {}", rule, rule.title());
        println!("    {}", rule.description());
    }
}

fn run_show(path: &std::path::Path) -> Result<()> {
    let log = GameLog::read(path).with_context(|| format!("cannot load {}", path.display()))?;

    println!("game {} (seed {})", log.index, log.seed);
    println!("rules: {}", display_rules(log.rules));
    println!("A: {}  B: {}", log.player_a, log.player_b);
    for record in &log.turns {
        println!(
            "  round {:>2}  {}  {:<22} +{:<2} -> A {} : B {}",
            record.round,
            record.side,
            record.mv.to_string(),
            record.points_captured(),
            record.score[Side::A],
            record.score[Side::B]
        );
    }
    for note in &log.notes {
        println!("  note: {note}");
    }
    print!("{}", log.final_state.board);
    match &log.final_state.phase {
        GamePhase::GameOver { result, message, .. } => println!("{result}: {message}"),
        GamePhase::AwaitingMove(side) => println!("unfinished, side {side} to move"),
    }
    Ok(())
}

fn display_rules(rules: ExtendedRuleSet) -> String {
    if rules.is_empty() {
        "base game".to_string()
    } else {
        rules.to_string()
    }
}
