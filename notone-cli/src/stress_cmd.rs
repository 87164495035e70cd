//! Stress command - rank players by average solo score
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_bus(), report_results()
//! - Level 4: progress bar, formatting utilities

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use notone_core::{Channel, Event, EventBus, Standing, DEFAULT_ROUNDS};
use notone_players::default_lineup;
use notone_tournament::{run_stress_test, StressConfig};

use crate::console::{self, GameReport, Narration};
use crate::game_cmd::create_rng;
use crate::lineup;
use crate::Output;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct StressArgs {
    /// Games per player
    #[arg(long, default_value = "10000")]
    pub games: usize,

    /// Rounds per game
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    pub game_rounds: u32,

    /// Trial players one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Player keys (defaults to the default lineup)
    #[arg(value_name = "PLAYER")]
    pub players: Vec<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run stress command
///
/// 1. Resolve the field
/// 2. Trial every player with progress reporting
/// 3. Report standings
pub fn run(args: StressArgs, output: Output, seed: Option<u64>) -> Result<()> {
    let entries = lineup::resolve(&args.players, default_lineup)?;
    let players = lineup::handles(&entries);

    let mut config = StressConfig::new(args.games);
    config.game_rounds = args.game_rounds;
    if args.sequential {
        config = config.sequential();
    }

    let progress = create_progress(players.len(), &output)?;
    let bus = build_bus(&output, &progress);
    let mut rng = create_rng(seed);
    let standings = run_stress_test(&players, &config, &bus, &mut rng)
        .context("Stress test aborted")?;
    progress.finish_and_clear();

    report_results(&standings, &output)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_bus(output: &Output, progress: &ProgressBar) -> EventBus {
    let mut bus = EventBus::new();

    let bar = progress.clone();
    bus.subscribe(Channel::StressTestPlayerStarted, move |event| {
        if let Event::StressTestPlayerStarted { player, .. } = event {
            bar.set_message(player.name().to_string());
        }
        Ok(())
    });
    let bar = progress.clone();
    bus.subscribe(Channel::StressTestPlayerEnded, move |event| {
        if let Event::StressTestPlayerEnded { player, .. } = event {
            bar.set_message(format!("{} done", player.name()));
        }
        bar.inc(1);
        Ok(())
    });

    if output.narrate() {
        console::attach(
            &mut bus,
            Narration {
                turns: false,
                games: GameReport::None,
                bracket: false,
                delay: Duration::ZERO,
            },
        );
    }
    bus
}

/// Text standings are printed by the console as the test ends
fn report_results(standings: &[Standing], output: &Output) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(standings)?);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Per-player progress bar on stderr, hidden for quiet or JSON output
fn create_progress(players: usize, output: &Output) -> Result<ProgressBar> {
    if output.quiet || output.json {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(players as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:30} {pos}/{len} {msg}")?,
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

// ============================================================================
// TESTS
// ============================================================================
