//! In-memory backends for the strata projection runtime
//!
//! [`MemoryEventStore`] implements the `EventStore` contract over a map of
//! event vectors; [`MemoryCheckpointStore`] holds the latest checkpoint in
//! a shared slot. Both are intended for tests and embedded use.

mod checkpoint;
mod store;

pub use checkpoint::MemoryCheckpointStore;
pub use store::MemoryEventStore;
