//! Immutable state values
//!
//! Every transition produces a new value. There are no setters: a new value is
//! derived from a prior one through its builder, which starts as a copy and
//! overrides only the named fields.

use serde::{Deserialize, Serialize};

// ============================================================================
// GAME STATE
// ============================================================================

/// Snapshot of a single game
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Index of the player on turn
    active: usize,
    /// Round number, 1-based once play starts
    round: u32,
    /// Banked points per player index
    scores: [u32; 2],
    /// Total rolls per player index
    rolls: [u32; 2],
    /// Rolls taken in the current turn
    turn_rolls: u32,
    /// Points accumulated in the current turn, not yet banked
    turn_score: u32,
    /// The two most recent die faces
    last_roll: (u8, u8),
    /// Winner index, `None` until the game ends or on a tie
    winner: Option<usize>,
}

impl GameState {
    /// Fresh state before round 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder seeded from the default state
    pub fn builder() -> GameStateBuilder {
        GameStateBuilder {
            state: Self::default(),
        }
    }

    /// Builder seeded from this state; unset fields carry over
    pub fn to_builder(&self) -> GameStateBuilder {
        GameStateBuilder {
            state: self.clone(),
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn rolls(&self) -> [u32; 2] {
        self.rolls
    }

    pub fn turn_rolls(&self) -> u32 {
        self.turn_rolls
    }

    pub fn turn_score(&self) -> u32 {
        self.turn_score
    }

    pub fn last_roll(&self) -> (u8, u8) {
        self.last_roll
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    /// Banked score of the player on turn
    ///
    /// Panics if `active` is not a seat (0 or 1).
    pub fn active_score(&self) -> u32 {
        self.scores[self.active]
    }

    /// Banked score of the player not on turn
    ///
    /// Panics if `active` is not a seat (0 or 1).
    pub fn opponent_score(&self) -> u32 {
        self.scores[1 - self.active]
    }

    /// Whether the game ended without a winner
    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }
}

/// Produces a new [`GameState`] from a prior one with named overrides
#[derive(Clone, Debug)]
#[must_use]
pub struct GameStateBuilder {
    state: GameState,
}

impl GameStateBuilder {
    pub fn active(mut self, active: usize) -> Self {
        self.state.active = active;
        self
    }

    pub fn round(mut self, round: u32) -> Self {
        self.state.round = round;
        self
    }

    pub fn scores(mut self, scores: [u32; 2]) -> Self {
        self.state.scores = scores;
        self
    }

    pub fn rolls(mut self, rolls: [u32; 2]) -> Self {
        self.state.rolls = rolls;
        self
    }

    pub fn turn_rolls(mut self, turn_rolls: u32) -> Self {
        self.state.turn_rolls = turn_rolls;
        self
    }

    pub fn turn_score(mut self, turn_score: u32) -> Self {
        self.state.turn_score = turn_score;
        self
    }

    pub fn last_roll(mut self, last_roll: (u8, u8)) -> Self {
        self.state.last_roll = last_roll;
        self
    }

    pub fn winner(mut self, winner: Option<usize>) -> Self {
        self.state.winner = winner;
        self
    }

    pub fn build(self) -> GameState {
        self.state
    }
}

// ============================================================================
// TOURNAMENT STATE
// ============================================================================

/// A bracket position: a bye placeholder or an entrant
///
/// Entrants are referenced by their index in the original, pre-shuffle field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Empty,
    Occupied(usize),
}

impl Slot {
    /// Index into the original field, if occupied
    pub fn entrant(self) -> Option<usize> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(index) => Some(index),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// Snapshot of a single-elimination tournament
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentState {
    /// Current tournament round, 0 before round 1
    round: u32,
    /// Number of entrants in the original field
    field_size: usize,
    /// Slots still in contention, in seed order
    competitors: Vec<Slot>,
    /// Index of the champion in the original field
    champion: Option<usize>,
}

impl TournamentState {
    pub fn new(field_size: usize) -> Self {
        Self {
            field_size,
            ..Self::default()
        }
    }

    /// Builder seeded from this state; unset fields carry over
    pub fn to_builder(&self) -> TournamentStateBuilder {
        TournamentStateBuilder {
            state: self.clone(),
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn field_size(&self) -> usize {
        self.field_size
    }

    pub fn competitors(&self) -> &[Slot] {
        &self.competitors
    }

    pub fn champion(&self) -> Option<usize> {
        self.champion
    }

    /// Occupied slots still in contention
    pub fn remaining(&self) -> usize {
        self.competitors.iter().filter(|s| !s.is_empty()).count()
    }
}

/// Produces a new [`TournamentState`] from a prior one with named overrides
#[derive(Clone, Debug)]
#[must_use]
pub struct TournamentStateBuilder {
    state: TournamentState,
}

impl TournamentStateBuilder {
    pub fn round(mut self, round: u32) -> Self {
        self.state.round = round;
        self
    }

    pub fn competitors(mut self, competitors: Vec<Slot>) -> Self {
        self.state.competitors = competitors;
        self
    }

    pub fn champion(mut self, champion: Option<usize>) -> Self {
        self.state.champion = champion;
        self
    }

    pub fn build(self) -> TournamentState {
        self.state
    }
}

// ============================================================================
// STRESS TEST STANDINGS
// ============================================================================

/// Repeated-trial result for one player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// Index of the player in the original field
    pub index: usize,
    /// Player name
    pub name: String,
    /// Player emblem
    pub emblem: String,
    /// Games played
    pub games: usize,
    /// Sum of final scores across all games
    pub cumulative_score: u64,
    /// Mean final score
    pub average_score: f64,
}
