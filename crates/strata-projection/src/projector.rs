use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

use strata_core::{
    CheckpointStore, EventStore, ProjectionConfig, RecordedEvent, Result, SequenceNumber,
    StrataError, StreamName, StreamPosition,
};

use crate::handlers::{DispatchMode, Handler, Handlers};

/// Lifecycle state of a projector.
///
/// `Stopped` means the last run observed a stop request and aborted before
/// exhausting its sources; `Idle` means the last run drained everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Stopped,
}

/// Cooperative cancellation token for a running projector.
///
/// Cloneable and callable from inside a handler closure. The run loop polls
/// it between events; it never interrupts an in-flight store call.
#[derive(Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

type InitFn = Box<dyn Fn() -> Value + Send>;

/// Projector: replays source streams against registered handlers,
/// accumulating derived state and checkpointing as it goes.
///
/// Execution is synchronous and single-threaded: `run()` processes streams
/// in registration order and events in storage order, persisting the
/// (position, state) pair through the injected [`CheckpointStore`] so a
/// later run resumes exactly where this one left off.
pub struct Projector<S: EventStore> {
    store: Arc<S>,
    checkpoints: Box<dyn CheckpointStore>,
    config: ProjectionConfig,
    sources: Vec<StreamName>,
    position: StreamPosition,
    state: Value,
    init: Option<InitFn>,
    dispatch: Option<DispatchMode>,
    status: Status,
    stop: StopHandle,
    /// Events processed since the checkpoint was last persisted
    dirty: usize,
}

impl<S: EventStore> Projector<S> {
    pub fn new(store: Arc<S>, checkpoints: Box<dyn CheckpointStore>, config: ProjectionConfig) -> Self {
        Self {
            store,
            checkpoints,
            config,
            sources: Vec::new(),
            position: StreamPosition::new(),
            state: Value::Null,
            init: None,
            dispatch: None,
            status: Status::Idle,
            stop: StopHandle::default(),
            dirty: 0,
        }
    }

    /// Register a source stream to replay. Order of registration is the
    /// order streams are visited; duplicates are ignored.
    pub fn from_stream(mut self, stream: impl Into<StreamName>) -> Self {
        let stream = stream.into();
        if !self.sources.contains(&stream) {
            self.sources.push(stream);
        }
        self
    }

    /// Register several source streams at once.
    pub fn from_streams<I, N>(mut self, streams: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<StreamName>,
    {
        for stream in streams {
            self = self.from_stream(stream);
        }
        self
    }

    /// Supply the initial state used when no checkpoint exists yet.
    pub fn init<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + 'static,
    {
        self.init = Some(Box::new(factory));
        self
    }

    /// Configure per-event-type dispatch.
    ///
    /// Replaces any previously configured mode, including a catch-all
    /// handler: configuration is last-writer-wins.
    pub fn when(mut self, handlers: Handlers) -> Self {
        self.dispatch = Some(DispatchMode::ByType(handlers.into_inner()));
        self
    }

    /// Configure a single catch-all handler for every event.
    ///
    /// Replaces any previously configured mode: last-writer-wins.
    pub fn when_any<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Value, &RecordedEvent) -> Result<Value> + Send + 'static,
    {
        self.dispatch = Some(DispatchMode::Single(Box::new(handler)));
        self
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn state(&self) -> &Value {
        &self.state
    }

    pub fn position(&self) -> &StreamPosition {
        &self.position
    }

    /// Token for requesting a cooperative stop, from any thread or from
    /// inside a handler.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Request a stop of the current (or next) run.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Replay all source streams from the last checkpoint to their heads.
    ///
    /// Returns once every source is drained or a stop was requested.
    /// Fails with `Config` before any store call if no source streams or
    /// no handlers are configured. Any store error other than a missing
    /// source stream aborts the run; checkpoints persisted so far stay
    /// valid, so a later `run()` resumes idempotently.
    pub fn run(&mut self) -> Result<()> {
        if self.status == Status::Running {
            return Err(StrataError::InvalidState("projection is already running".into()));
        }
        if self.sources.is_empty() {
            return Err(StrataError::Config("no source streams configured".into()));
        }
        if self.dispatch.as_ref().map_or(true, DispatchMode::is_empty) {
            return Err(StrataError::Config("no handlers configured".into()));
        }

        self.load_checkpoint()?;
        self.stop.reset();
        self.status = Status::Running;

        let result = self.replay();

        self.status = if self.stop.is_stop_requested() {
            Status::Stopped
        } else {
            Status::Idle
        };
        result
    }

    /// Emit an event into the projection's own managed output stream.
    ///
    /// Fails with `EmitDisabled` unless the projection was configured with
    /// emission enabled.
    pub fn emit(&self, event: RecordedEvent) -> Result<()> {
        if !self.config.emit_enabled {
            return Err(StrataError::EmitDisabled);
        }
        self.link_to(&StreamName::new(self.config.name.as_str()), event)
    }

    /// Append an event to an arbitrary named stream.
    ///
    /// The lower-level primitive behind [`emit`](Projector::emit); not
    /// gated by the emission flag. The store creates the stream if needed.
    pub fn link_to(&self, stream: &StreamName, event: RecordedEvent) -> Result<()> {
        self.store.append_to(stream, vec![event])
    }

    /// Delete the managed output stream and clear position, state, and the
    /// persisted checkpoint. Valid from any non-running state.
    pub fn reset(&mut self) -> Result<()> {
        if self.status == Status::Running {
            return Err(StrataError::InvalidState("cannot reset a running projection".into()));
        }

        let own = StreamName::new(self.config.name.as_str());
        match self.store.delete(&own) {
            Ok(()) => {}
            // Nothing was ever emitted; nothing to delete.
            Err(e) if e.is_stream_not_found() => {}
            Err(e) => return Err(e),
        }

        self.position.clear();
        self.state = Value::Null;
        self.dirty = 0;
        self.checkpoints.clear()?;
        self.status = Status::Idle;

        tracing::debug!(projection = %self.config.name, "projection reset");
        Ok(())
    }

    /// Adopt the persisted checkpoint if one exists, otherwise start fresh,
    /// then make sure every configured source is tracked.
    fn load_checkpoint(&mut self) -> Result<()> {
        match self.checkpoints.load()? {
            Some(checkpoint) => {
                self.position = checkpoint.position;
                self.state = checkpoint.state;
            }
            None => {
                self.position = StreamPosition::new();
                self.state = match &self.init {
                    Some(factory) => factory(),
                    None => Value::Null,
                };
            }
        }
        self.position.prepare(&self.sources);
        self.dirty = 0;
        Ok(())
    }

    fn replay(&mut self) -> Result<()> {
        if self.config.emit_enabled {
            let own = StreamName::new(self.config.name.as_str());
            if !self.store.has_stream(&own)? {
                self.store.create(&own, Vec::new())?;
            }
        }

        // Snapshot the replay plan up front: positions mutate as events are
        // consumed, the set and order of streams must not.
        let plan: Vec<(StreamName, SequenceNumber)> = self
            .position
            .positions()
            .map(|(name, seq)| (name.clone(), seq))
            .collect();

        let mut processed = 0usize;

        'streams: for (stream, seq) in plan {
            let events = match self.store.load(&stream, seq + 1) {
                Ok(events) => events,
                Err(e) if e.is_stream_not_found() => {
                    // Source streams are created lazily; nothing new here.
                    tracing::debug!(stream = %stream, "source stream absent, skipping");
                    continue;
                }
                Err(e) => return Err(e),
            };

            for event in events {
                let event = event?;
                self.process(&stream, event)?;
                processed += 1;

                if self.stop.is_stop_requested() {
                    tracing::debug!(stream = %stream, "stop requested, aborting replay");
                    break 'streams;
                }
            }
        }

        self.flush()?;
        tracing::debug!(
            projection = %self.config.name,
            events = processed,
            "replay pass complete"
        );
        Ok(())
    }

    /// Consume one event: advance the position, dispatch, apply returned
    /// state, checkpoint.
    ///
    /// The position increment comes before handler lookup so the checkpoint
    /// records "seen", not "had an effect" -- an event with no matching
    /// handler must never be refetched on resume.
    fn process(&mut self, stream: &StreamName, event: RecordedEvent) -> Result<()> {
        self.position.increment(stream)?;

        let handler: Option<&Handler> = match &self.dispatch {
            Some(mode) => mode.handler_for(&event.event_type),
            None => None,
        };

        if let Some(handler) = handler {
            let result = handler(&self.state, &event)?;
            if result.is_object() {
                self.state = result;
            }
        }

        self.dirty += 1;
        if self.dirty >= self.config.persist_block_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Persist the (position, state) pair if anything changed since the
    /// last persist. The pair is written as one unit by the backend.
    fn flush(&mut self) -> Result<()> {
        if self.dirty == 0 {
            return Ok(());
        }
        self.checkpoints.persist(&self.position, &self.state)?;
        self.dirty = 0;
        Ok(())
    }
}
