//! Event store trait and types
//!
//! Defines the interface the projection engine consumes from an event store
//! backend (in-memory, embedded, remote). Transport, authentication, and
//! cluster node selection all live behind this boundary.

use crate::error::Result;
use crate::types::{RecordedEvent, SequenceNumber, StreamName};

/// Iterator over events of a single stream, in storage order
pub trait StreamIter: Iterator<Item = Result<RecordedEvent>> + Send {}

impl<T: Iterator<Item = Result<RecordedEvent>> + Send> StreamIter for T {}

impl std::fmt::Debug for dyn StreamIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StreamIter")
    }
}

/// Event store backend
///
/// All operations are blocking; timeouts and retries are the backend's
/// concern, not the caller's.
pub trait EventStore: Send + Sync {
    /// Whether a stream with the given name exists
    fn has_stream(&self, stream: &StreamName) -> Result<bool>;

    /// Create a stream, optionally seeded with initial events
    ///
    /// Fails with `InvalidState` if the stream already exists.
    fn create(&self, stream: &StreamName, initial: Vec<RecordedEvent>) -> Result<()>;

    /// Remove a stream and all of its events
    ///
    /// Fails with `StreamNotFound` if the stream does not exist.
    fn delete(&self, stream: &StreamName) -> Result<()>;

    /// Iterate events at sequence `from` and later, in storage order
    ///
    /// Fails with `StreamNotFound` if the stream does not exist. Callers
    /// resuming from a tracked position pass `position + 1`.
    fn load(&self, stream: &StreamName, from: SequenceNumber) -> Result<Box<dyn StreamIter>>;

    /// Append events to a stream, creating it if necessary
    ///
    /// Ordering within the call is preserved.
    fn append_to(&self, stream: &StreamName, events: Vec<RecordedEvent>) -> Result<()>;
}
