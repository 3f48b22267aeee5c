//! Command-line interface for o-an-quan.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use o_an_quan::agents::PlayerKind;
use o_an_quan::play::LogFormat;
use o_an_quan::rules::ExtendedRule;

/// Ô Ăn Quan move engine and match runner
#[derive(Parser, Debug)]
#[command(name = "o-an-quan")]
#[command(about = "Play and inspect Ô Ăn Quan games between automated agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a batch of games between two agents
    Play {
        /// Match configuration file (TOML); flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of games
        #[arg(short, long)]
        games: Option<usize>,

        /// Master seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Extended rules, e.g. `--rules E1 E3` or `--rules E1,E3`
        #[arg(short, long, num_args = 1.., value_delimiter = ',')]
        rules: Option<Vec<ExtendedRule>>,

        /// Agent for side A (random | greedy)
        #[arg(long)]
        player_a: Option<PlayerKind>,

        /// Agent for side B (random | greedy)
        #[arg(long)]
        player_b: Option<PlayerKind>,

        /// Write one log file per game into this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Log encoding (json | bincode)
        #[arg(long)]
        log_format: Option<LogFormat>,

        /// Only print the match summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Describe the extended rules
    Rules {
        /// Rules to describe (all when omitted)
        rules: Vec<ExtendedRule>,
    },

    /// Print the summary of a saved game log
    Show {
        /// Log file written by `play --log-dir`
        file: PathBuf,
    },
}
