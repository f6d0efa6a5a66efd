use std::collections::HashMap;

use parking_lot::RwLock;

use strata_core::{
    EventStore, RecordedEvent, Result, SequenceNumber, StrataError, StreamIter, StreamName,
};

/// In-memory event store.
///
/// Streams are vectors of events; an event's sequence number is its index.
/// Suitable for tests and embedded single-process use. All operations take
/// the lock briefly and clone out what they return, so iteration never
/// holds the store locked.
#[derive(Default)]
pub struct MemoryEventStore {
    streams: RwLock<HashMap<StreamName, Vec<RecordedEvent>>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events currently in a stream, if it exists.
    pub fn stream_len(&self, stream: &StreamName) -> Option<usize> {
        self.streams.read().get(stream).map(Vec::len)
    }
}

impl EventStore for MemoryEventStore {
    fn has_stream(&self, stream: &StreamName) -> Result<bool> {
        Ok(self.streams.read().contains_key(stream))
    }

    fn create(&self, stream: &StreamName, initial: Vec<RecordedEvent>) -> Result<()> {
        let mut streams = self.streams.write();
        if streams.contains_key(stream) {
            return Err(StrataError::InvalidState(format!(
                "stream '{}' already exists",
                stream
            )));
        }
        streams.insert(stream.clone(), initial);
        Ok(())
    }

    fn delete(&self, stream: &StreamName) -> Result<()> {
        let mut streams = self.streams.write();
        match streams.remove(stream) {
            Some(_) => Ok(()),
            None => Err(StrataError::StreamNotFound(stream.clone())),
        }
    }

    fn load(&self, stream: &StreamName, from: SequenceNumber) -> Result<Box<dyn StreamIter>> {
        let streams = self.streams.read();
        let events = streams
            .get(stream)
            .ok_or_else(|| StrataError::StreamNotFound(stream.clone()))?;

        let start = from.max(0) as usize;
        let tail: Vec<Result<RecordedEvent>> = events.iter().skip(start).cloned().map(Ok).collect();
        Ok(Box::new(tail.into_iter()))
    }

    fn append_to(&self, stream: &StreamName, events: Vec<RecordedEvent>) -> Result<()> {
        let mut streams = self.streams.write();
        streams.entry(stream.clone()).or_default().extend(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(event_type: &str, n: u64) -> RecordedEvent {
        RecordedEvent::new(event_type, json!({ "n": n }))
    }

    #[test]
    fn test_create_then_create_fails() {
        let store = MemoryEventStore::new();
        store.create(&"orders".into(), vec![]).unwrap();

        let err = store.create(&"orders".into(), vec![]).unwrap_err();
        assert!(matches!(err, StrataError::InvalidState(_)));
    }

    #[test]
    fn test_load_missing_stream_is_not_found() {
        let store = MemoryEventStore::new();
        let err = store.load(&"orders".into(), 0).unwrap_err();
        assert!(err.is_stream_not_found());
    }

    #[test]
    fn test_load_respects_lower_bound() {
        let store = MemoryEventStore::new();
        let orders: StreamName = "orders".into();
        store
            .create(&orders, vec![event("a", 0), event("b", 1), event("c", 2)])
            .unwrap();

        let types: Vec<String> = store
            .load(&orders, 1)
            .unwrap()
            .map(|e| e.unwrap().event_type)
            .collect();
        assert_eq!(types, vec!["b", "c"]);

        // from = -1 + 1 = 0 reads everything
        assert_eq!(store.load(&orders, 0).unwrap().count(), 3);
    }

    #[test]
    fn test_append_creates_and_preserves_order() {
        let store = MemoryEventStore::new();
        let orders: StreamName = "orders".into();

        store.append_to(&orders, vec![event("a", 0)]).unwrap();
        store
            .append_to(&orders, vec![event("b", 1), event("c", 2)])
            .unwrap();

        assert!(store.has_stream(&orders).unwrap());
        let types: Vec<String> = store
            .load(&orders, 0)
            .unwrap()
            .map(|e| e.unwrap().event_type)
            .collect();
        assert_eq!(types, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_delete_removes_stream() {
        let store = MemoryEventStore::new();
        let orders: StreamName = "orders".into();
        store.create(&orders, vec![event("a", 0)]).unwrap();

        store.delete(&orders).unwrap();
        assert!(!store.has_stream(&orders).unwrap());

        let err = store.delete(&orders).unwrap_err();
        assert!(err.is_stream_not_found());
    }
}
