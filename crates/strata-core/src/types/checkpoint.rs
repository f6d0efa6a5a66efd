use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::StreamPosition;

/// A persisted (position, state) snapshot.
///
/// The two halves are written and read as one unit: a resume must never
/// observe a position without the state that was derived at that position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Per-stream replay positions at snapshot time
    pub position: StreamPosition,

    /// Accumulated projection state at snapshot time
    pub state: Value,

    /// When this snapshot was taken
    pub persisted_at: DateTime<Utc>,
}

impl Checkpoint {
    pub fn new(position: StreamPosition, state: Value) -> Self {
        Self {
            position,
            state,
            persisted_at: Utc::now(),
        }
    }
}
