//! Handler registration and dispatch
//!
//! A projection routes events either through one catch-all handler or
//! through a per-event-type table. The two modes are mutually exclusive;
//! [`DispatchMode`] makes the choice unrepresentable as anything else.

use indexmap::IndexMap;
use serde_json::Value;

use strata_core::{RecordedEvent, Result};

/// A projection handler.
///
/// Receives the current state and one event; returns the next state. A
/// returned JSON object replaces the state wholesale, any other value
/// leaves the state untouched.
pub type Handler = Box<dyn Fn(&Value, &RecordedEvent) -> Result<Value> + Send>;

/// Active dispatch mode, fixed at configuration time.
pub enum DispatchMode {
    /// One handler for every event, regardless of type
    Single(Handler),

    /// Handler per event type; unmatched events are still checkpointed
    ByType(IndexMap<String, Handler>),
}

impl DispatchMode {
    /// Resolve the handler for an event type, or `None` for a no-op event.
    pub fn handler_for(&self, event_type: &str) -> Option<&Handler> {
        match self {
            DispatchMode::Single(handler) => Some(handler),
            DispatchMode::ByType(handlers) => handlers.get(event_type),
        }
    }

    /// A `ByType` table with no entries counts as "no handlers configured".
    pub fn is_empty(&self) -> bool {
        match self {
            DispatchMode::Single(_) => false,
            DispatchMode::ByType(handlers) => handlers.is_empty(),
        }
    }
}

/// Builder for a per-event-type handler table.
#[derive(Default)]
pub struct Handlers {
    handlers: IndexMap<String, Handler>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event type. Registering the same type
    /// twice replaces the earlier handler.
    pub fn on<F>(mut self, event_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Value, &RecordedEvent) -> Result<Value> + Send + 'static,
    {
        self.handlers.insert(event_type.into(), Box::new(handler));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn into_inner(self) -> IndexMap<String, Handler> {
        self.handlers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(event_type: &str) -> RecordedEvent {
        RecordedEvent::new(event_type, Value::Null)
    }

    #[test]
    fn test_single_matches_every_type() {
        let mode = DispatchMode::Single(Box::new(|_, _| Ok(json!({}))));
        assert!(mode.handler_for("anything").is_some());
        assert!(mode.handler_for("").is_some());
    }

    #[test]
    fn test_by_type_lookup() {
        let handlers = Handlers::new()
            .on("created", |_, _| Ok(json!({"seen": "created"})))
            .on("updated", |_, _| Ok(json!({"seen": "updated"})));
        let mode = DispatchMode::ByType(handlers.into_inner());

        assert!(mode.handler_for("created").is_some());
        assert!(mode.handler_for("deleted").is_none());
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let handlers = Handlers::new()
            .on("created", |_, _| Ok(json!({"version": 1})))
            .on("created", |_, _| Ok(json!({"version": 2})));
        let mode = DispatchMode::ByType(handlers.into_inner());

        let handler = mode.handler_for("created").unwrap();
        let out = handler(&Value::Null, &event("created")).unwrap();
        assert_eq!(out, json!({"version": 2}));
    }

    #[test]
    fn test_empty_by_type_is_empty() {
        assert!(DispatchMode::ByType(Handlers::new().into_inner()).is_empty());
        assert!(!DispatchMode::Single(Box::new(|_, _| Ok(Value::Null))).is_empty());
    }
}
