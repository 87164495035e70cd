//! Event channels and payloads
//!
//! The set of channels is closed: every state transition the engines announce
//! has exactly one [`Channel`], and each [`Event`] variant fixes the payload
//! shape for its channel. Payloads borrow the state value that was current at
//! publish time; handlers see it read-only.

use std::fmt;

use crate::player::Player;
use crate::state::{GameState, Slot, Standing, TournamentState};

/// Event channel identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    GameStarted,
    RoundStarted,
    TurnStarted,
    Rolled,
    RollSucceeded,
    RollFailed,
    TurnEnded,
    RoundEnded,
    GameEnded,
    TournamentStarted,
    TournamentRoundStarted,
    TournamentRoundEnded,
    TournamentEnded,
    StressTestStarted,
    StressTestPlayerStarted,
    StressTestPlayerEnded,
    StressTestEnded,
}

impl Channel {
    /// Every channel, in declaration order
    pub const ALL: [Channel; 17] = [
        Channel::GameStarted,
        Channel::RoundStarted,
        Channel::TurnStarted,
        Channel::Rolled,
        Channel::RollSucceeded,
        Channel::RollFailed,
        Channel::TurnEnded,
        Channel::RoundEnded,
        Channel::GameEnded,
        Channel::TournamentStarted,
        Channel::TournamentRoundStarted,
        Channel::TournamentRoundEnded,
        Channel::TournamentEnded,
        Channel::StressTestStarted,
        Channel::StressTestPlayerStarted,
        Channel::StressTestPlayerEnded,
        Channel::StressTestEnded,
    ];

    /// Stable snake_case name
    pub fn name(self) -> &'static str {
        match self {
            Channel::GameStarted => "game_started",
            Channel::RoundStarted => "round_started",
            Channel::TurnStarted => "turn_started",
            Channel::Rolled => "rolled",
            Channel::RollSucceeded => "roll_succeeded",
            Channel::RollFailed => "roll_failed",
            Channel::TurnEnded => "turn_ended",
            Channel::RoundEnded => "round_ended",
            Channel::GameEnded => "game_ended",
            Channel::TournamentStarted => "tournament_started",
            Channel::TournamentRoundStarted => "tournament_round_started",
            Channel::TournamentRoundEnded => "tournament_round_ended",
            Channel::TournamentEnded => "tournament_ended",
            Channel::StressTestStarted => "stress_test_started",
            Channel::StressTestPlayerStarted => "stress_test_player_started",
            Channel::StressTestPlayerEnded => "stress_test_player_ended",
            Channel::StressTestEnded => "stress_test_ended",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event and its payload
#[derive(Clone, Copy, Debug)]
pub enum Event<'a> {
    GameStarted {
        state: &'a GameState,
        players: &'a [&'a dyn Player],
    },
    RoundStarted {
        state: &'a GameState,
        round: u32,
    },
    TurnStarted {
        state: &'a GameState,
        player: &'a dyn Player,
    },
    Rolled {
        state: &'a GameState,
        d1: u8,
        d2: u8,
    },
    RollSucceeded {
        state: &'a GameState,
        d1: u8,
        d2: u8,
    },
    RollFailed {
        state: &'a GameState,
        d1: u8,
        d2: u8,
    },
    TurnEnded {
        state: &'a GameState,
        player: &'a dyn Player,
    },
    RoundEnded {
        state: &'a GameState,
        round: u32,
        players: &'a [&'a dyn Player],
    },
    GameEnded {
        state: &'a GameState,
        players: &'a [&'a dyn Player],
    },
    TournamentStarted {
        state: &'a TournamentState,
        players: &'a [&'a dyn Player],
    },
    TournamentRoundStarted {
        state: &'a TournamentState,
        round: u32,
        competitors: &'a [Slot],
        players: &'a [&'a dyn Player],
    },
    TournamentRoundEnded {
        state: &'a TournamentState,
        round: u32,
        competitors: &'a [Slot],
        players: &'a [&'a dyn Player],
    },
    TournamentEnded {
        state: &'a TournamentState,
        players: &'a [&'a dyn Player],
    },
    StressTestStarted {
        players: &'a [&'a dyn Player],
        total_games: usize,
    },
    StressTestPlayerStarted {
        player: &'a dyn Player,
        total_games: usize,
    },
    StressTestPlayerEnded {
        player: &'a dyn Player,
        cumulative_score: u64,
        average_score: f64,
    },
    StressTestEnded {
        standings: &'a [Standing],
    },
}

impl Event<'_> {
    /// The channel this event is published on
    pub fn channel(&self) -> Channel {
        match self {
            Event::GameStarted { .. } => Channel::GameStarted,
            Event::RoundStarted { .. } => Channel::RoundStarted,
            Event::TurnStarted { .. } => Channel::TurnStarted,
            Event::Rolled { .. } => Channel::Rolled,
            Event::RollSucceeded { .. } => Channel::RollSucceeded,
            Event::RollFailed { .. } => Channel::RollFailed,
            Event::TurnEnded { .. } => Channel::TurnEnded,
            Event::RoundEnded { .. } => Channel::RoundEnded,
            Event::GameEnded { .. } => Channel::GameEnded,
            Event::TournamentStarted { .. } => Channel::TournamentStarted,
            Event::TournamentRoundStarted { .. } => Channel::TournamentRoundStarted,
            Event::TournamentRoundEnded { .. } => Channel::TournamentRoundEnded,
            Event::TournamentEnded { .. } => Channel::TournamentEnded,
            Event::StressTestStarted { .. } => Channel::StressTestStarted,
            Event::StressTestPlayerStarted { .. } => Channel::StressTestPlayerStarted,
            Event::StressTestPlayerEnded { .. } => Channel::StressTestPlayerEnded,
            Event::StressTestEnded { .. } => Channel::StressTestEnded,
        }
    }

    /// Game state carried by game-level events
    pub fn game_state(&self) -> Option<&GameState> {
        match *self {
            Event::GameStarted { state, .. }
            | Event::RoundStarted { state, .. }
            | Event::TurnStarted { state, .. }
            | Event::Rolled { state, .. }
            | Event::RollSucceeded { state, .. }
            | Event::RollFailed { state, .. }
            | Event::TurnEnded { state, .. }
            | Event::RoundEnded { state, .. }
            | Event::GameEnded { state, .. } => Some(state),
            _ => None,
        }
    }

    /// Tournament state carried by tournament-level events
    pub fn tournament_state(&self) -> Option<&TournamentState> {
        match *self {
            Event::TournamentStarted { state, .. }
            | Event::TournamentRoundStarted { state, .. }
            | Event::TournamentRoundEnded { state, .. }
            | Event::TournamentEnded { state, .. } => Some(state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names_are_unique() {
        let mut names: Vec<&str> = Channel::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Channel::ALL.len());
    }

    #[test]
    fn test_event_channel_matches_variant() {
        let state = GameState::new();
        let event = Event::Rolled { state: &state, d1: 3, d2: 4 };
        assert_eq!(event.channel(), Channel::Rolled);
        assert_eq!(event.game_state(), Some(&state));
        assert!(event.tournament_state().is_none());
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::TournamentRoundEnded.to_string(), "tournament_round_ended");
    }
}
