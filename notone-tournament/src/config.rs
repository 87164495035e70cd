//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use notone_core::DEFAULT_ROUNDS;

/// Single-elimination tournament configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Bracket rounds to play (None = enough to crown a champion)
    pub rounds: Option<u32>,
    /// Rounds per game
    pub game_rounds: u32,
    /// Cap on replays of a tied matchup (None = replay until decided)
    pub max_replays: Option<u32>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: None,
            game_rounds: DEFAULT_ROUNDS,
            max_replays: None,
        }
    }
}

impl TournamentConfig {
    /// Play an explicit number of bracket rounds
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }

    /// Set rounds per game
    pub fn with_game_rounds(mut self, game_rounds: u32) -> Self {
        self.game_rounds = game_rounds;
        self
    }

    /// Give up on a matchup after this many tied replays
    pub fn with_max_replays(mut self, max_replays: u32) -> Self {
        self.max_replays = Some(max_replays);
        self
    }
}

/// Configuration for repeated solo trials
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StressConfig {
    /// Games per player
    pub games: usize,
    /// Rounds per game
    pub game_rounds: u32,
    /// Whether to trial players in parallel
    pub parallel: bool,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            games: 10_000,
            game_rounds: DEFAULT_ROUNDS,
            parallel: true,
        }
    }
}

impl StressConfig {
    /// Create config with specified games per player
    pub fn new(games: usize) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    /// Trial players one after another on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
