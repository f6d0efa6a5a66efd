pub mod checkpoint;
pub mod store;

pub use checkpoint::CheckpointStore;
pub use store::{EventStore, StreamIter};
