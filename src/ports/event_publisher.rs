//! Event publisher port.
//!
//! Handlers publish domain events after a successful persistence write;
//! the transport behind this trait is an adapter concern. Delivery is
//! at-least-once, so subscribers must tolerate duplicates.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Outbound port for domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event envelope.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several envelopes in order.
    ///
    /// The default publishes sequentially and stops at the first
    /// failure; adapters with a batching transport override it.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
