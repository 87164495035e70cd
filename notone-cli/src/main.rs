//! Not One CLI - Command-line interface
//!
//! Commands:
//! - game: Play a single head-to-head game
//! - tournament: Run a single-elimination bracket
//! - stress: Average each player's solo score over many games
//! - roster: List the built-in players

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod console;
mod game_cmd;
mod lineup;
mod stress_cmd;
mod tournament_cmd;

use game_cmd::GameArgs;
use stress_cmd::StressArgs;
use tournament_cmd::TournamentArgs;

#[derive(Parser)]
#[command(name = "notone")]
#[command(about = "Not One dice game simulator")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pause after each roll, in milliseconds
    #[arg(long, global = true, default_value = "0")]
    delay_ms: u64,

    /// Print only final results
    #[arg(long, global = true)]
    quiet: bool,

    /// Print final results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game between two players
    Game(GameArgs),
    /// Run a single-elimination tournament
    Tournament(TournamentArgs),
    /// Average each player's solo score over many games
    Stress(StressArgs),
    /// List the built-in players
    Roster,
}

/// Presentation options shared by every command
#[derive(Clone, Copy, Debug)]
pub struct Output {
    pub delay: Duration,
    pub quiet: bool,
    pub json: bool,
}

impl Output {
    /// Whether the console renderer should be attached at all
    pub fn narrate(&self) -> bool {
        !self.json
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = Output {
        delay: Duration::from_millis(cli.delay_ms),
        quiet: cli.quiet,
        json: cli.json,
    };

    match cli.command {
        Commands::Game(args) => game_cmd::run(args, output, cli.seed),
        Commands::Tournament(args) => tournament_cmd::run(args, output, cli.seed),
        Commands::Stress(args) => stress_cmd::run(args, output, cli.seed),
        Commands::Roster => {
            lineup::print_roster();
            Ok(())
        }
    }
}

/// Log to stderr so stdout carries only game output
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
