use std::fmt;

use serde::{Deserialize, Serialize};

/// Sequence number of an event within a stream.
///
/// Sequences are 0-based. A tracked stream with no consumed events sits at
/// `-1`, so "next unseen" is always `position + 1`.
pub type SequenceNumber = i64;

/// Name of an append-only event stream.
///
/// Newtype over `String` so stream names cannot be confused with event type
/// identifiers or projection names in signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamName(String);

impl StreamName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for StreamName {
    fn from(name: String) -> Self {
        Self(name)
    }
}
