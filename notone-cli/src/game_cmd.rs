//! Game command - play one head-to-head game
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_bus(), report_results()
//! - Level 4: create_rng(), formatting utilities

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use notone_core::{play_game, EventBus, GameState, Player, DEFAULT_ROUNDS};

use crate::console::{self, GameReport, Narration};
use crate::lineup;
use crate::Output;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GameArgs {
    /// Rounds to play
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: u32,

    /// Two player keys (defaults to the first two of the default lineup)
    #[arg(value_name = "PLAYER")]
    pub players: Vec<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run game command
///
/// 1. Resolve both players
/// 2. Play the game with the console attached
/// 3. Report results
pub fn run(args: GameArgs, output: Output, seed: Option<u64>) -> Result<()> {
    let entries = lineup::resolve(&args.players, lineup::head_to_head)?;
    if entries.len() != 2 {
        bail!("A game needs exactly two players, got {}", entries.len());
    }
    let players = lineup::handles(&entries);

    tracing::info!(
        "Starting game: {} vs {} ({} rounds)",
        players[0].name(),
        players[1].name(),
        args.rounds
    );

    let bus = build_bus(&output);
    let mut rng = create_rng(seed);
    let state =
        play_game(&players, args.rounds, &bus, &mut rng).context("Game aborted")?;

    report_results(&state, &players, &output)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_bus(output: &Output) -> EventBus {
    let mut bus = EventBus::new();
    if output.narrate() {
        console::attach(
            &mut bus,
            Narration {
                turns: !output.quiet,
                games: GameReport::Full,
                bracket: false,
                delay: output.delay,
            },
        );
    }
    bus
}

/// Text results are printed by the console as the game ends
fn report_results(state: &GameState, players: &[&dyn Player], output: &Output) -> Result<()> {
    if output.json {
        print_json_results(state, players)?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_json_results(state: &GameState, players: &[&dyn Player]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        players: Vec<&'a str>,
        winner: Option<&'a str>,
        state: &'a GameState,
    }

    let output = JsonOutput {
        players: players.iter().map(|p| p.name()).collect(),
        winner: state
            .winner()
            .and_then(|index| players.get(index))
            .map(|p| p.name()),
        state,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
