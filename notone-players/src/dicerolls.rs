//! Harry Dicerolls - reads the opponent's last turn before taking risks

use std::sync::{Mutex, PoisonError};

use notone_core::{GameState, Player};

/// Base risk appetite, in points
const BASE_APPETITE: f64 = 30.0;
/// Appetite after the opponent banked nothing last turn
const PUNISH_APPETITE: f64 = 40.0;
/// Appetite consumed by each roll already taken
const DECAY_PER_ROLL: f64 = 10.0;

/// What Harry remembers between decisions
#[derive(Debug)]
struct Memory {
    opponent_previous_score: u32,
    opponent_failed: bool,
}

/// Always takes the first roll, then weighs the score gap against the
/// number of rolls taken. Gets bolder when the opponent just busted.
#[derive(Debug)]
pub struct HarryDicerolls {
    memory: Mutex<Memory>,
}

impl Default for HarryDicerolls {
    fn default() -> Self {
        Self {
            memory: Mutex::new(Memory {
                opponent_previous_score: 1,
                opponent_failed: false,
            }),
        }
    }
}

impl HarryDicerolls {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for HarryDicerolls {
    fn name(&self) -> &str {
        "Harry Dicerolls"
    }

    fn emblem(&self) -> String {
        "🤘".to_string()
    }

    fn victory_phrase(&self) -> String {
        "Best roll ever!".to_string()
    }

    fn should_roll_again(&self, state: &GameState) -> bool {
        let mut memory = self.memory.lock().unwrap_or_else(PoisonError::into_inner);
        let opponent_score = state.opponent_score();

        if state.turn_rolls() == 0 {
            // Seat 0 opens the game, so there is no previous opponent turn to read
            memory.opponent_failed =
                state.active() != 0 && memory.opponent_previous_score == opponent_score;
            memory.opponent_previous_score = opponent_score;
            return true;
        }

        let [first, second] = state.scores();
        let score_diff = f64::from(first.abs_diff(second));
        let appetite = if memory.opponent_failed {
            PUNISH_APPETITE
        } else {
            BASE_APPETITE + score_diff / 9.0
        };
        let decay = f64::from(state.turn_rolls() + 1) * DECAY_PER_ROLL;

        appetite - decay >= 0.0
    }
}
