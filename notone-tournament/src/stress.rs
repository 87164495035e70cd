//! Stress test - average solo score over many games
//!
//! Level 1 - Orchestration, Level 2 - Phases, Level 3 - Steps

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use notone_core::{play_game, Event, EventBus, GameError, Player, Standing};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::StressConfig;
use crate::error::TournamentError;

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Trial every player solo and rank them by average final score
///
/// Each player draws its own seed from `rng` up front, so standings are the
/// same whether or not trials run in parallel. Trial games publish nothing;
/// only the stress-test channels reach `bus`.
pub fn run_stress_test<R: Rng + ?Sized>(
    players: &[&dyn Player],
    config: &StressConfig,
    bus: &EventBus,
    rng: &mut R,
) -> Result<Vec<Standing>, TournamentError> {
    if players.is_empty() {
        return Err(TournamentError::EmptyField);
    }

    tracing::info!(
        "Starting stress test: {} players, {} games each",
        players.len(),
        config.games
    );
    bus.publish(Event::StressTestStarted {
        players,
        total_games: config.games,
    })?;

    let seeds: Vec<u64> = players.iter().map(|_| rng.gen()).collect();

    let totals = if config.parallel {
        trial_in_parallel(players, &seeds, config, bus)?
    } else {
        trial_in_sequence(players, &seeds, config, bus)?
    };

    let mut standings: Vec<Standing> = players
        .iter()
        .zip(totals)
        .enumerate()
        .map(|(index, (player, cumulative_score))| Standing {
            index,
            name: player.name().to_string(),
            emblem: player.emblem(),
            games: config.games,
            cumulative_score,
            average_score: average(cumulative_score, config.games),
        })
        .collect();

    // Sort by average (descending); ties keep field order
    standings.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    bus.publish(Event::StressTestEnded {
        standings: &standings,
    })?;
    Ok(standings)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Trial players one after another, announcing each around its trial
fn trial_in_sequence(
    players: &[&dyn Player],
    seeds: &[u64],
    config: &StressConfig,
    bus: &EventBus,
) -> Result<Vec<u64>, TournamentError> {
    let mut totals = Vec::with_capacity(players.len());
    for (&player, &seed) in players.iter().zip(seeds) {
        announce_started(player, config, bus)?;
        let total = trial_player(player, config, seed)?;
        announce_ended(player, total, config, bus)?;
        totals.push(total);
    }
    Ok(totals)
}

/// Trial players on the rayon pool, announcing each as it finishes
///
/// Every player is announced as started before work is dispatched. Finished
/// trials come back over a channel, so the bus is only used from the calling
/// thread. After a failure the remaining queued trials are skipped.
fn trial_in_parallel(
    players: &[&dyn Player],
    seeds: &[u64],
    config: &StressConfig,
    bus: &EventBus,
) -> Result<Vec<u64>, TournamentError> {
    for &player in players {
        announce_started(player, config, bus)?;
    }

    let stop = AtomicBool::new(false);
    let (sender, receiver) = mpsc::channel::<(usize, Result<u64, GameError>)>();

    thread::scope(|scope| {
        let stop = &stop;
        scope.spawn(move || {
            players
                .par_iter()
                .zip(seeds.par_iter())
                .enumerate()
                .for_each_with(sender, |sender, (index, (&player, &seed))| {
                    if stop.load(Ordering::Relaxed) {
                        return;
                    }
                    let total = trial_player(player, config, seed);
                    // Send fails only once the receiver has given up
                    let _ = sender.send((index, total));
                });
        });

        let mut totals = vec![0; players.len()];
        for (index, total) in receiver {
            let announced = total.map_err(TournamentError::from).and_then(|total| {
                totals[index] = total;
                announce_ended(players[index], total, config, bus)
            });
            if let Err(err) = announced {
                stop.store(true, Ordering::Relaxed);
                return Err(err);
            }
        }
        Ok(totals)
    })
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Play `config.games` solo games and sum the final scores
fn trial_player(player: &dyn Player, config: &StressConfig, seed: u64) -> Result<u64, GameError> {
    let silent = EventBus::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cumulative = 0u64;

    for _ in 0..config.games {
        let state = play_game(&[player], config.game_rounds, &silent, &mut rng)?;
        cumulative += u64::from(state.scores()[0]);
    }

    tracing::debug!("{}: {} points over {} games", player.name(), cumulative, config.games);
    Ok(cumulative)
}

fn announce_started(player: &dyn Player, config: &StressConfig, bus: &EventBus) -> Result<(), TournamentError> {
    bus.publish(Event::StressTestPlayerStarted {
        player,
        total_games: config.games,
    })?;
    Ok(())
}

fn announce_ended(
    player: &dyn Player,
    cumulative_score: u64,
    config: &StressConfig,
    bus: &EventBus,
) -> Result<(), TournamentError> {
    bus.publish(Event::StressTestPlayerEnded {
        player,
        cumulative_score,
        average_score: average(cumulative_score, config.games),
    })?;
    Ok(())
}

fn average(total: u64, games: usize) -> f64 {
    if games == 0 {
        0.0
    } else {
        total as f64 / games as f64
    }
}
