//! Saved level state: the ordered list of placed bodies.
//!
//! Failures never reach the editor core. Saving reports `false` and loading
//! falls back to an empty level, both after logging the cause.

use std::path::PathBuf;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::ShapeKind;
use crate::geometry::xy;
use crate::world::EditorWorld;

/// Error type for reading or writing saved state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed stored state: {0}")]
    Json(#[from] serde_json::Error),
}

/// One persisted body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDescriptor {
    pub shape_kind: ShapeKind,
    pub constructor_params: Vec<f32>,
    #[serde(with = "xy")]
    pub initial_position: Vec2,
}

/// Descriptors for every editor body, in world order.
pub fn make_state(world: &EditorWorld) -> Vec<BodyDescriptor> {
    world
        .bodies()
        .iter()
        .filter_map(|entry| {
            entry.meta().map(|meta| BodyDescriptor {
                shape_kind: entry.shape.kind(),
                constructor_params: entry.shape.constructor_params(),
                initial_position: meta.initial_position,
            })
        })
        .collect()
}

/// Somewhere to keep the serialized state text.
pub trait StateStorage {
    /// Stored text, or `None` if nothing was saved yet.
    fn read(&self) -> Result<Option<String>, StorageError>;

    fn write(&mut self, text: &str) -> Result<(), StorageError>;
}

/// Keeps the state in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    pub text: Option<String>,
}

impl StateStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.text.clone())
    }

    fn write(&mut self, text: &str) -> Result<(), StorageError> {
        self.text = Some(text.to_owned());
        Ok(())
    }
}

/// Keeps the state in a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), StorageError> {
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Serializes and stores `state`. Returns whether it was written.
pub fn save_state(storage: &mut dyn StateStorage, state: &[BodyDescriptor]) -> bool {
    let result = serde_json::to_string(state)
        .map_err(StorageError::from)
        .and_then(|json| storage.write(&json));

    match result {
        Ok(()) => {
            tracing::info!(bodies = state.len(), "state saved");
            true
        }
        Err(e) => {
            tracing::error!("couldn't save state to storage: {e}");
            false
        }
    }
}

/// Reads stored state, or an empty list if there is none or it is unreadable.
pub fn load_state(storage: &dyn StateStorage) -> Vec<BodyDescriptor> {
    let text = match storage.read() {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::error!("couldn't load state from storage: {e}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<BodyDescriptor>>(&text) {
        Ok(state) => {
            tracing::info!(bodies = state.len(), "state loaded");
            state
        }
        Err(e) => {
            tracing::error!("couldn't load state from storage: {e}");
            Vec::new()
        }
    }
}
