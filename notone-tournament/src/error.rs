//! Error types for tournament play

use notone_core::{BusError, GameError};

/// Errors surfaced by [`play_tournament`](crate::play_tournament) and
/// [`run_stress_test`](crate::run_stress_test)
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("a tournament needs at least one player")]
    EmptyField,

    #[error("{rounds} rounds requested but the field supports at most {max}")]
    TooManyRounds { rounds: u32, max: u32 },

    #[error("matchup still tied after {replays} replays")]
    Unresolved { replays: u32 },

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Bus(#[from] BusError),
}
