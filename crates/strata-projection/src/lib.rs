//! Strata Projection: the projection execution engine
//!
//! A [`Projector`] replays one or more append-only source streams against
//! registered handlers, accumulates derived state, and persists (position,
//! state) checkpoints so replay resumes incrementally:
//!
//! - Streams are visited in registration order, events in storage order
//! - The position advances before dispatch, so unmatched events are never
//!   refetched on resume
//! - A missing source stream is "no new events", not an error
//! - Stops are cooperative, observed between events
//!
//! Handlers are plain closures over an opaque JSON state; emission into
//! managed output streams is gated at construction time.

mod handlers;
mod projector;

pub use handlers::{DispatchMode, Handler, Handlers};
pub use projector::{Projector, Status, StopHandle};
