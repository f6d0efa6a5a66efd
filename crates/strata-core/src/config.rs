use serde::{Deserialize, Serialize};

/// Configuration for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Projection name; doubles as the name of the managed output stream
    pub name: String,

    /// Whether `emit` may write to the managed output stream
    /// Default: false
    #[serde(default)]
    pub emit_enabled: bool,

    /// Persist the checkpoint every N processed events
    /// Default: 1 (after every event)
    #[serde(default = "default_persist_block_size")]
    pub persist_block_size: usize,
}

fn default_persist_block_size() -> usize {
    1
}

impl ProjectionConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emit_enabled: false,
            persist_block_size: default_persist_block_size(),
        }
    }

    pub fn with_emit_enabled(mut self, enabled: bool) -> Self {
        self.emit_enabled = enabled;
        self
    }

    pub fn with_persist_block_size(mut self, size: usize) -> Self {
        self.persist_block_size = size.max(1);
        self
    }
}
