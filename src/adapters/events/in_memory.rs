//! In-memory event publisher.
//!
//! Records published events in process memory. Suitable for development,
//! single-node deployments, and tests; a broker-backed adapter replaces
//! it without touching the handlers.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Event publisher that keeps envelopes in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventPublisher {
    events: Arc<Mutex<Vec<EventEnvelope>>>,
}

impl InMemoryEventPublisher {
    /// Creates a new empty publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all events published so far.
    pub fn published(&self) -> Vec<EventEnvelope> {
        self.events.lock().unwrap().clone()
    }

    /// Returns how many events were published.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::debug!(event_type = %event.event_type, aggregate_id = %event.aggregate_id, "event published");
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: crate::domain::foundation::EventId::new(),
            event_type: event_type.to_string(),
            schema_version: 1,
            aggregate_id: "agg-1".to_string(),
            aggregate_type: "Session".to_string(),
            occurred_at: crate::domain::foundation::Timestamp::now(),
            payload: json!({}),
            metadata: Default::default(),
        }
    }

    #[tokio::test]
    async fn publish_records_event() {
        let publisher = InMemoryEventPublisher::new();
        publisher
            .publish(test_envelope("session.started.v1"))
            .await
            .unwrap();

        assert_eq!(publisher.count(), 1);
        assert_eq!(publisher.published()[0].event_type, "session.started.v1");
    }

    #[tokio::test]
    async fn publish_all_preserves_order() {
        let publisher = InMemoryEventPublisher::new();
        publisher
            .publish_all(vec![test_envelope("a.v1"), test_envelope("b.v1")])
            .await
            .unwrap();

        let published = publisher.published();
        assert_eq!(published[0].event_type, "a.v1");
        assert_eq!(published[1].event_type, "b.v1");
    }
}
