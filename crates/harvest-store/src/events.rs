//! # Store Events
//!
//! Observers learn about catalog and order changes through a broadcast
//! channel. Events are published only after the backend write returned Ok.
//!
//! ```text
//! service write ──► backend Ok ──► EventBus::publish ──► every subscriber
//!                   backend Err ──► nothing published
//! ```

use harvest_core::OrderStatus;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Buffered events per subscriber before it starts lagging.
const EVENT_CAPACITY: usize = 256;

/// A completed change to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    ItemAdded { item_id: String },
    ItemUpdated { item_id: String },
    ItemDeleted { item_id: String },
    OrderPlaced { order_id: String, total_cents: i64 },
    OrderStatusChanged { order_id: String, status: OrderStatus },
}

/// Cloneable handle to the broadcast channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        EventBus { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Sends to current subscribers. Having none is not an error.
    pub fn publish(&self, event: StoreEvent) {
        trace!(?event, "Publishing store event");
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        EventBus::new(EVENT_CAPACITY)
    }
}
