use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use strata_core::{Checkpoint, CheckpointStore, Result, StreamPosition};

/// In-memory checkpoint store.
///
/// Holds the latest (position, state) snapshot behind a mutex so the pair
/// is always observed whole. Cloning shares the underlying slot, which lets
/// a test hand the same checkpoint history to a second projector and
/// verify idempotent resume.
#[derive(Default, Clone)]
pub struct MemoryCheckpointStore {
    slot: Arc<Mutex<Option<Checkpoint>>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at the current snapshot without going through a projector.
    pub fn snapshot(&self) -> Option<Checkpoint> {
        self.slot.lock().clone()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn load(&self) -> Result<Option<Checkpoint>> {
        Ok(self.slot.lock().clone())
    }

    fn persist(&mut self, position: &StreamPosition, state: &Value) -> Result<()> {
        let checkpoint = Checkpoint::new(position.clone(), state.clone());
        *self.slot.lock() = Some(checkpoint);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strata_core::StreamName;

    #[test]
    fn test_persist_load_clear() {
        let mut store = MemoryCheckpointStore::new();
        assert!(store.load().unwrap().is_none());

        let mut position = StreamPosition::new();
        position.prepare(&[StreamName::from("orders")]);
        position.increment(&"orders".into()).unwrap();

        store.persist(&position, &json!({"count": 1})).unwrap();

        let checkpoint = store.load().unwrap().unwrap();
        assert_eq!(checkpoint.position.get(&"orders".into()), Some(0));
        assert_eq!(checkpoint.state, json!({"count": 1}));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let mut store = MemoryCheckpointStore::new();
        let shared = store.clone();

        let position = StreamPosition::new();
        store.persist(&position, &json!({"ok": true})).unwrap();

        assert_eq!(shared.load().unwrap().unwrap().state, json!({"ok": true}));
    }
}
