//! Error types for the game engine and event bus

use crate::event::Channel;

/// A subscriber failed while handling an event
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("{channel} handler failed")]
    Handler {
        channel: Channel,
        #[source]
        source: anyhow::Error,
    },
}

impl BusError {
    /// Channel the failing handler was subscribed to
    pub fn channel(&self) -> Channel {
        match self {
            BusError::Handler { channel, .. } => *channel,
        }
    }
}

/// Errors surfaced by [`play_game`](crate::game::play_game)
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("a game needs one or two players, got {count}")]
    PlayerCount { count: usize },

    #[error(transparent)]
    Bus(#[from] BusError),
}
