pub mod checkpoint;
pub mod event;
pub mod gossip;
pub mod position;
pub mod stream;

pub use checkpoint::Checkpoint;
pub use event::RecordedEvent;
pub use gossip::{EndPoint, GossipSeed};
pub use position::StreamPosition;
pub use stream::{SequenceNumber, StreamName};
