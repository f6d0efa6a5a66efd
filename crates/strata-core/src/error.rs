use std::io;
use thiserror::Error;

use crate::types::StreamName;

#[derive(Error, Debug)]
pub enum StrataError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Stream '{0}' not found")]
    StreamNotFound(StreamName),

    #[error("Emit is disabled")]
    EmitDisabled,

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StrataError>;

impl StrataError {
    /// True for the one condition the replay loop is allowed to swallow:
    /// a source stream that does not exist yet.
    pub fn is_stream_not_found(&self) -> bool {
        matches!(self, StrataError::StreamNotFound(_))
    }
}

// Custom Error Types:
//
// Strata supports custom error types through the `#[from] anyhow::Error`
// variant. Any error implementing `std::error::Error + Send + Sync + 'static`
// can be converted to `StrataError::Other`. Handlers that fail with a domain
// error should map it through `StrataError::Handler` so the run loop reports
// which handler aborted the replay.
