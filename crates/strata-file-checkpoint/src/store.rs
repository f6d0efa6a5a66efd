use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use strata_core::{Checkpoint, CheckpointStore, Result, StrataError, StreamPosition};

const CHECKPOINT_FILE: &str = "checkpoint.json";
const CHECKPOINT_TMP: &str = "checkpoint.json.tmp";

/// File-backed checkpoint store.
///
/// The (position, state) pair is serialized as one JSON document and
/// written via temp-file-then-rename, so a crash mid-write leaves either
/// the previous snapshot or the new one, never a torn file.
pub struct FileCheckpointStore {
    dir: PathBuf,
}

impl FileCheckpointStore {
    /// Store checkpoints under `dir`, one projection per directory.
    /// The directory is created on first persist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CHECKPOINT_FILE)
    }

    fn read(path: &Path) -> Result<Option<Checkpoint>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(checkpoint) => Ok(Some(checkpoint)),
            Err(e) => {
                // A corrupt snapshot is recoverable: the projection rebuilds
                // from scratch instead of refusing to start.
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "discarding unreadable checkpoint"
                );
                Ok(None)
            }
        }
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn load(&self) -> Result<Option<Checkpoint>> {
        Self::read(&self.path())
    }

    fn persist(&mut self, position: &StreamPosition, state: &Value) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let checkpoint = Checkpoint::new(position.clone(), state.clone());
        let json = serde_json::to_string_pretty(&checkpoint)
            .map_err(|e| StrataError::Serialization(e.to_string()))?;

        let tmp = self.dir.join(CHECKPOINT_TMP);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.path())?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strata_core::StreamName;
    use tempfile::TempDir;

    fn position(seq: i64) -> StreamPosition {
        let mut pos = StreamPosition::new();
        pos.prepare(&[StreamName::from("orders")]);
        for _ in 0..=seq {
            pos.increment(&"orders".into()).unwrap();
        }
        pos
    }

    #[test]
    fn test_load_before_first_persist_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileCheckpointStore::new(dir.path().join("proj"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_persist_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = FileCheckpointStore::new(dir.path());

        store.persist(&position(2), &json!({"count": 3})).unwrap();

        let checkpoint = store.load().unwrap().unwrap();
        assert_eq!(checkpoint.position.get(&"orders".into()), Some(2));
        assert_eq!(checkpoint.state, json!({"count": 3}));
    }

    #[test]
    fn test_persist_replaces_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let mut store = FileCheckpointStore::new(dir.path());

        store.persist(&position(0), &json!({"count": 1})).unwrap();
        store.persist(&position(1), &json!({"count": 2})).unwrap();

        let checkpoint = store.load().unwrap().unwrap();
        assert_eq!(checkpoint.state, json!({"count": 2}));
        assert!(!dir.path().join(CHECKPOINT_TMP).exists());
    }

    #[test]
    fn test_corrupt_checkpoint_is_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let mut store = FileCheckpointStore::new(dir.path());
        store.persist(&position(0), &json!({"count": 1})).unwrap();

        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut store = FileCheckpointStore::new(dir.path());
        store.persist(&position(0), &json!(null)).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Clearing an empty store is fine.
        store.clear().unwrap();
    }
}
