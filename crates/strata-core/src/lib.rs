//! Strata Core: Traits and types for the strata projection runtime
//!
//! This crate defines the core abstractions for an event-sourcing
//! projection client:
//! - Event store contract: named append-only streams of typed events
//! - Checkpoint store contract: atomic (position, state) snapshots
//! - Stream positions: insertion-ordered per-stream replay cursors
//! - Projection configuration: name, emission gating, persist batching
//!
//! Key properties:
//! - Deterministic replay: streams are visited in registration order and
//!   events in storage order
//! - Idempotent resume: a projection restarted from its checkpoint skips
//!   everything it has already seen
//! - Synchronous execution: all store operations are ordinary blocking calls

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::ProjectionConfig;
pub use error::{Result, StrataError};
pub use traits::{CheckpointStore, EventStore, StreamIter};
pub use types::{
    Checkpoint, EndPoint, GossipSeed, RecordedEvent, SequenceNumber, StreamName, StreamPosition,
};
