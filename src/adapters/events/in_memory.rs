//! In-memory event bus.
//!
//! Records every published envelope for assertions and fans it out to live
//! listeners over a `tokio::sync::broadcast` channel. Delivery is in-process
//! and in publish order.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Buffer size of the listener channel.
const LISTENER_CAPACITY: usize = 256;

/// In-memory event bus.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// let mut listener = bus.listen();
///
/// bus.publish(envelope).await?;
///
/// assert_eq!(bus.event_count(), 1);
/// assert!(bus.has_event("decision.published"));
/// let received = listener.recv().await?;
/// ```
pub struct InMemoryEventBus {
    published: Mutex<Vec<EventEnvelope>>,
    listeners: broadcast::Sender<EventEnvelope>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        let (listeners, _) = broadcast::channel(LISTENER_CAPACITY);
        Self {
            published: Mutex::new(Vec::new()),
            listeners,
        }
    }

    /// Receives every envelope published after this call.
    pub fn listen(&self) -> broadcast::Receiver<EventEnvelope> {
        self.listeners.subscribe()
    }

    // === Test Helpers ===

    /// Returns all published events.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.lock().clone()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.lock().iter().any(|e| e.event_type == event_type)
    }

    /// A panic while holding the lock cannot leave the Vec half-written,
    /// so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Vec<EventEnvelope>> {
        self.published.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::debug!(
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            "Publishing event"
        );
        self.lock().push(event.clone());
        // No listeners is fine.
        let _ = self.listeners.send(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
