//! Tournament command - run a single-elimination bracket
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), build_bus(), report_results()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use notone_core::{EventBus, Player, TournamentState, DEFAULT_ROUNDS};
use notone_players::roster;
use notone_tournament::{play_tournament, TournamentConfig};

use crate::console::{self, GameReport, Narration};
use crate::game_cmd::create_rng;
use crate::lineup;
use crate::Output;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TournamentArgs {
    /// Bracket rounds to play (defaults to enough to crown a champion)
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Rounds per game
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    pub game_rounds: u32,

    /// Give up on a matchup after this many tied replays
    #[arg(long)]
    pub max_replays: Option<u32>,

    /// Player keys (defaults to the whole roster)
    #[arg(value_name = "PLAYER")]
    pub players: Vec<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run tournament command
///
/// 1. Resolve the field
/// 2. Play the bracket with the console attached
/// 3. Report the champion
pub fn run(args: TournamentArgs, output: Output, seed: Option<u64>) -> Result<()> {
    let entries = lineup::resolve(&args.players, roster)?;
    let players = lineup::handles(&entries);
    let config = build_config(&args);

    tracing::info!(
        "Starting tournament command: {} players, config {:?}",
        players.len(),
        config
    );

    let bus = build_bus(&output);
    let mut rng = create_rng(seed);
    let state = play_tournament(&players, &config, &bus, &mut rng)
        .context("Tournament aborted")?;

    report_results(&state, &players, &output)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &TournamentArgs) -> TournamentConfig {
    let mut config = TournamentConfig::default().with_game_rounds(args.game_rounds);
    if let Some(rounds) = args.rounds {
        config = config.with_rounds(rounds);
    }
    if let Some(max_replays) = args.max_replays {
        config = config.with_max_replays(max_replays);
    }
    config
}

fn build_bus(output: &Output) -> EventBus {
    let mut bus = EventBus::new();
    if output.narrate() {
        let games = if output.quiet {
            GameReport::None
        } else {
            GameReport::Line
        };
        console::attach(
            &mut bus,
            Narration {
                turns: false,
                games,
                bracket: !output.quiet,
                delay: output.delay,
            },
        );
    }
    bus
}

/// Text results are printed by the console as the bracket ends
fn report_results(state: &TournamentState, players: &[&dyn Player], output: &Output) -> Result<()> {
    if output.json {
        print_json_results(state, players)?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_json_results(state: &TournamentState, players: &[&dyn Player]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        players: Vec<&'a str>,
        rounds_played: u32,
        champion: Option<&'a str>,
        remaining: Vec<&'a str>,
    }

    let name = |index: usize| players.get(index).map(|p| p.name());
    let output = JsonOutput {
        players: players.iter().map(|p| p.name()).collect(),
        rounds_played: state.round(),
        champion: state.champion().and_then(name),
        remaining: state
            .competitors()
            .iter()
            .filter_map(|slot| slot.entrant().and_then(name))
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
