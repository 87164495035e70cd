//! Not One Core - Game engine and event contracts
//!
//! This crate provides the core game logic for Not One:
//! - Immutable game and tournament state values
//! - The player capability interface (identity + roll-again strategy)
//! - A typed publish/subscribe event bus, one channel per event kind
//! - The game engine: turn/round/roll transitions and winner selection

pub mod bus;
pub mod error;
pub mod event;
pub mod game;
pub mod player;
pub mod state;

// Re-exports for convenient access
pub use bus::EventBus;
pub use error::{BusError, GameError};
pub use event::{Channel, Event};
pub use game::{play_game, DEFAULT_ROUNDS};
pub use player::Player;
pub use state::{GameState, Slot, Standing, TournamentState};
