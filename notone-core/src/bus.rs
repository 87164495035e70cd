//! Typed publish/subscribe event bus
//!
//! Handlers are registered per [`Channel`] and invoked synchronously, in
//! registration order, on the publishing thread. The first handler error stops
//! dispatch and is returned to the publisher. A slow handler blocks the
//! simulation, which is how presentation layers pace a game.

use rustc_hash::FxHashMap;

use crate::error::BusError;
use crate::event::{Channel, Event};

/// Boxed event handler
pub type Handler = Box<dyn Fn(&Event<'_>) -> anyhow::Result<()>>;

/// Registry of handlers keyed by channel
#[derive(Default)]
pub struct EventBus {
    handlers: FxHashMap<Channel, Vec<Handler>>,
}

impl EventBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler on one channel
    pub fn subscribe<F>(&mut self, channel: Channel, handler: F)
    where
        F: Fn(&Event<'_>) -> anyhow::Result<()> + 'static,
    {
        self.handlers
            .entry(channel)
            .or_default()
            .push(Box::new(handler));
    }

    /// Register one handler on several channels
    pub fn subscribe_many<F>(&mut self, channels: &[Channel], handler: F)
    where
        F: Fn(&Event<'_>) -> anyhow::Result<()> + Clone + 'static,
    {
        for &channel in channels {
            self.subscribe(channel, handler.clone());
        }
    }

    /// Deliver an event to every handler on its channel
    pub fn publish(&self, event: Event<'_>) -> Result<(), BusError> {
        let channel = event.channel();
        let Some(handlers) = self.handlers.get(&channel) else {
            return Ok(());
        };

        for handler in handlers {
            handler(&event).map_err(|source| BusError::Handler { channel, source })?;
        }
        Ok(())
    }

    /// Number of handlers registered on a channel
    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.handlers.get(&channel).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(Channel, usize)> = self
            .handlers
            .iter()
            .map(|(channel, handlers)| (*channel, handlers.len()))
            .collect();
        counts.sort();
        f.debug_struct("EventBus").field("handlers", &counts).finish()
    }
}
