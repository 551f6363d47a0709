//! SOC event fan-out.
//!
//! Every open `/stream` connection holds one receiver of a bounded
//! [`tokio::sync::broadcast`] channel; a connection that closes drops its
//! receiver and stops counting. [`EventHub::broadcast`] serializes an event
//! once and hands the same JSON text to every live receiver. Delivery is
//! best effort: nothing is queued for connections that are gone, and a
//! receiver that falls more than [`HUB_CAPACITY`] events behind skips
//! ahead rather than slowing the sender down.

use std::sync::Arc;

use pinnacle_types::StreamEvent;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Capacity of the broadcast channel.
pub const HUB_CAPACITY: usize = 256;

/// Serialized event frame shared between all receivers.
pub type Frame = Arc<str>;

/// Fan-out point for stream events.
#[derive(Debug, Clone)]
pub struct EventHub {
    tx: broadcast::Sender<Frame>,
}

impl EventHub {
    /// Create a hub with no connections.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(HUB_CAPACITY);
        Self { tx }
    }

    /// Register a new connection.
    ///
    /// The connection stays registered until the returned receiver is
    /// dropped.
    pub fn subscribe(&self) -> broadcast::Receiver<Frame> {
        self.tx.subscribe()
    }

    /// Number of connections currently registered.
    pub fn open_connections(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Send an event to every open connection.
    ///
    /// Returns the number of connections the frame was handed to. Zero
    /// open connections is not an error.
    pub fn broadcast(&self, event: &StreamEvent) -> usize {
        let frame: Frame = match serde_json::to_string(event) {
            Ok(json) => Arc::from(json),
            Err(e) => {
                warn!(error = %e, "failed to serialize stream event");
                return 0;
            }
        };

        // send only fails when there are no receivers.
        let delivered = self.tx.send(frame).unwrap_or(0);
        debug!(kind = ?event.kind, delivered, "stream event broadcast");
        delivered
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}
