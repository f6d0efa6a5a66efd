use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::types::{SequenceNumber, StreamName};

/// Last-processed sequence number per source stream.
///
/// Streams are kept in first-registration order and that order drives the
/// replay loop, so a projection visits its sources deterministically across
/// runs. Positions only move forward: one increment per consumed event,
/// recorded by the engine before handler dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamPosition {
    streams: IndexMap<StreamName, SequenceNumber>,
}

impl StreamPosition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register any streams not yet tracked, starting them at `-1`
    /// ("nothing seen"). Streams already tracked keep their position, so
    /// this is safe to call over a checkpoint that was loaded from disk.
    pub fn prepare(&mut self, streams: &[StreamName]) {
        for stream in streams {
            self.streams.entry(stream.clone()).or_insert(-1);
        }
    }

    /// Ordered (stream, sequence) pairs, in first-registration order.
    pub fn positions(&self) -> impl Iterator<Item = (&StreamName, SequenceNumber)> {
        self.streams.iter().map(|(name, seq)| (name, *seq))
    }

    /// Advance a tracked stream by exactly one event.
    ///
    /// Increments are only valid for streams registered via [`prepare`];
    /// an untracked name means the caller skipped registration, which would
    /// silently corrupt the checkpoint if allowed through.
    ///
    /// [`prepare`]: StreamPosition::prepare
    pub fn increment(&mut self, stream: &StreamName) -> Result<()> {
        match self.streams.get_mut(stream) {
            Some(seq) => {
                *seq += 1;
                Ok(())
            }
            None => Err(StrataError::InvalidState(format!(
                "cannot increment untracked stream '{}'",
                stream
            ))),
        }
    }

    pub fn get(&self, stream: &StreamName) -> Option<SequenceNumber> {
        self.streams.get(stream).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Drop all tracked streams. Used by projection reset.
    pub fn clear(&mut self) {
        self.streams.clear();
    }
}
