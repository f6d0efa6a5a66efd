//! File-backed checkpoint storage for the strata projection runtime
//!
//! Persists the (position, state) pair as a single JSON document using
//! write-then-rename, keeping the pair atomic across crashes.

mod store;

pub use store::FileCheckpointStore;
