//! Domain event infrastructure.
//!
//! Events record facts that already happened (`SessionStarted`,
//! `InterviewArchived`, ...). Each event type carries its own id,
//! aggregate reference, and timestamp; `to_envelope()` wraps it in the
//! transport-neutral `EventEnvelope` the `EventPublisher` port accepts.
//! Event type strings end in a `.vN` suffix so consumers can dispatch on
//! schema version.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Unique id of one event instance, used for consumer-side deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Correlation context attached to an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Links the events of a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    /// Operator or respondent who triggered the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

/// Transport wrapper: routing fields outside, typed payload as JSON inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    /// Routing key, e.g. "session.completed.v1".
    pub event_type: String,
    pub schema_version: u32,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Reads the `.vN` suffix of an event type; no suffix means 1.
    pub(crate) fn extract_version(event_type: &str) -> u32 {
        event_type
            .rsplit_once(".v")
            .and_then(|(_, version)| version.parse().ok())
            .unwrap_or(1)
    }

    /// Recovers the typed event from the payload.
    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

/// Contract every domain event implements, via `domain_event!`.
pub trait DomainEvent: Send + Sync {
    /// Versioned routing key ("session.started.v1").
    fn event_type(&self) -> &'static str;

    /// Must agree with the suffix of `event_type`.
    fn schema_version(&self) -> u32;

    fn aggregate_id(&self) -> String;

    fn aggregate_type(&self) -> &'static str;

    fn occurred_at(&self) -> Timestamp;

    fn event_id(&self) -> EventId;
}

/// Blanket envelope conversion for serializable events.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    fn to_envelope(&self) -> EventEnvelope {
        let event_type = self.event_type().to_string();
        let schema_version = EventEnvelope::extract_version(&event_type);

        EventEnvelope {
            event_id: self.event_id(),
            event_type,
            schema_version,
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_string(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self)
                .expect("domain events serialize to plain JSON structs"),
            metadata: EventMetadata::default(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements `DomainEvent` by mapping trait methods onto struct fields.
///
/// The schema version is read from the type string's `.vN` suffix, and
/// the event struct is expected to carry its id in an `event_id` field.
///
/// ```ignore
/// domain_event!(SessionStarted {
///     event_type: "session.started.v1",
///     aggregate: Session(session_id),
///     occurred_at: started_at,
/// });
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident {
            event_type: $event_type:literal,
            aggregate: $agg_type:ident($agg_id_field:ident),
            occurred_at: $occurred_field:ident $(,)?
        }
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn schema_version(&self) -> u32 {
                $crate::domain::foundation::EventEnvelope::extract_version($event_type)
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                stringify!($agg_type)
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.event_id.clone()
            }
        }
    };
}
