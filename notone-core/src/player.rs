//! Player capability interface

use crate::state::GameState;

/// A participant: identity metadata plus a roll-again decision
///
/// The engines only ever ask yes/no questions of a player. Strategies that
/// remember things between calls keep that memory in their own fields behind
/// interior mutability; the engines treat every player as an opaque decider
/// and never copy or mutate it.
pub trait Player: Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// Short symbol shown next to the name
    fn emblem(&self) -> String;

    /// Line shown when this player wins a game
    fn victory_phrase(&self) -> String;

    /// Whether to roll again given the current state
    fn should_roll_again(&self, state: &GameState) -> bool;
}

impl std::fmt::Debug for dyn Player + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player").field("name", &self.name()).finish()
    }
}
