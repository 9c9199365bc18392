//! In-process fan-out of domain events to connected observers.

use async_trait::async_trait;
use presence_core::traits::{EventPublisher, RepoResult};
use presence_core::DomainEvent;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 1024;

/// Broadcast hub shared by every observer on this instance.
///
/// The buffer is bounded: an observer that falls more than `capacity` events
/// behind skips the missed ones.
#[derive(Debug, Clone)]
pub struct EventHub {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventHub {
    /// Create a hub buffering up to `capacity` events per observer
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Register a new observer
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    /// Deliver an event to current observers, returning how many there were
    pub fn send(&self, event: DomainEvent) -> usize {
        // No receivers is not an error
        self.tx.send(event).unwrap_or(0)
    }

    /// Number of currently subscribed observers
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// [`EventPublisher`] that delivers straight to the local hub (single instance)
#[derive(Debug, Clone)]
pub struct LocalEventPublisher {
    hub: EventHub,
}

impl LocalEventPublisher {
    /// Publish into the given hub
    #[must_use]
    pub fn new(hub: EventHub) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl EventPublisher for LocalEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> RepoResult<usize> {
        let receivers = self.hub.send(event.clone());
        tracing::debug!(
            event_type = event.event_type(),
            receivers,
            "Published event locally"
        );
        Ok(receivers)
    }
}
