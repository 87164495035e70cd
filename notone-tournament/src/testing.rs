//! Fixed-rule players for driving brackets in tests

use std::sync::atomic::{AtomicU32, Ordering};

use notone_core::{GameState, Player};

/// Rolls until a roll fails, so never banks anything
pub(crate) struct Reckless;

/// Never rolls
pub(crate) struct Passive;

/// Rolls a fixed number of times per turn
pub(crate) struct Steady(pub(crate) u32);

/// Sits out its first `idle` games, then takes one safe roll per turn
pub(crate) struct LateBloomer {
    idle: u32,
    games: AtomicU32,
}

impl LateBloomer {
    pub(crate) fn new(idle: u32) -> Self {
        Self {
            idle,
            games: AtomicU32::new(0),
        }
    }
}

impl Player for Reckless {
    fn name(&self) -> &str {
        "Reckless"
    }

    fn emblem(&self) -> String {
        "R".to_string()
    }

    fn victory_phrase(&self) -> String {
        "Lucky!".to_string()
    }

    fn should_roll_again(&self, _state: &GameState) -> bool {
        true
    }
}

impl Player for Passive {
    fn name(&self) -> &str {
        "Passive"
    }

    fn emblem(&self) -> String {
        "P".to_string()
    }

    fn victory_phrase(&self) -> String {
        "Huh.".to_string()
    }

    fn should_roll_again(&self, _state: &GameState) -> bool {
        false
    }
}

impl Player for Steady {
    fn name(&self) -> &str {
        "Steady"
    }

    fn emblem(&self) -> String {
        "S".to_string()
    }

    fn victory_phrase(&self) -> String {
        "Slow and steady.".to_string()
    }

    fn should_roll_again(&self, state: &GameState) -> bool {
        state.turn_rolls() < self.0
    }
}

impl Player for LateBloomer {
    fn name(&self) -> &str {
        "Late Bloomer"
    }

    fn emblem(&self) -> String {
        "L".to_string()
    }

    fn victory_phrase(&self) -> String {
        "Worth the wait.".to_string()
    }

    fn should_roll_again(&self, state: &GameState) -> bool {
        // First decision of a game
        if state.round() == 1 && state.turn_rolls() == 0 {
            self.games.fetch_add(1, Ordering::Relaxed);
        }
        self.games.load(Ordering::Relaxed) > self.idle && state.turn_rolls() < 1
    }
}
