use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An event as read from (or written to) a stream.
///
/// The engine only inspects `event_type` for dispatch; `payload` and
/// `metadata` are opaque and flow through to handlers untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Event type identifier used for per-type handler dispatch
    pub event_type: String,

    /// Opaque event payload
    pub payload: Value,

    /// Opaque event metadata
    #[serde(default)]
    pub metadata: Value,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl RecordedEvent {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
            metadata: Value::Null,
            created_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}
