use serde_json::Value;

use crate::error::Result;
use crate::types::{Checkpoint, StreamPosition};

/// Checkpoint storage backend
///
/// Persists the (position, state) pair the engine records after processed
/// events. `persist` must be atomic for the pair: a subsequent `load` may
/// observe an older snapshot, never half of a newer one.
pub trait CheckpointStore: Send {
    /// Load the last persisted snapshot, if any
    fn load(&self) -> Result<Option<Checkpoint>>;

    /// Persist a new snapshot, replacing the previous one
    fn persist(&mut self, position: &StreamPosition, state: &Value) -> Result<()>;

    /// Remove any persisted snapshot. Used by projection reset.
    fn clear(&mut self) -> Result<()>;
}
