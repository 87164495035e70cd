//! Not One Tournament - Brackets and repeated trials
//!
//! This crate composes the game engine into larger formats:
//! - Single-elimination brackets with blind seeding and byes
//! - Stress tests averaging a player's solo score over many games
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: play_tournament, run_stress_test (orchestration)
//! - Level 2: play_round, trial_player (phases)
//! - Level 3: seed_players, matchup_players, play_matchup, crown_champion (steps)
//! - Level 4: utilities, configuration

mod bracket;
mod config;
mod error;
mod stress;

#[cfg(test)]
mod testing;

pub use bracket::{
    crown_champion, matchup_players, most_rounds_supported, play_matchup, play_tournament,
    rounds_necessary_for_winner, seed_players,
};
pub use config::{StressConfig, TournamentConfig};
pub use error::TournamentError;
pub use stress::run_stress_test;
