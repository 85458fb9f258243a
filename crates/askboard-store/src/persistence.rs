//! Persistence adapters for the question store.
//!
//! The store calls [`Persistence::save`] after every mutation and
//! [`Persistence::load`] once, when it is opened.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::snapshot::{SnapshotEnvelope, StoreSnapshot, SNAPSHOT_NAME, SNAPSHOT_VERSION};

pub trait Persistence: Send {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<StoreSnapshot>>;
    fn save(&self, snapshot: &StoreSnapshot) -> Result<()>;
    fn describe(&self) -> String;
}

// ── JSON file ─────────────────────────────────────────────────────────────────

/// One JSON file holding the snapshot envelope. Writes go to a sibling temp
/// file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> Result<Option<StoreSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let envelope: SnapshotEnvelope = serde_json::from_str(&content)?;
        if envelope.name != SNAPSHOT_NAME || envelope.version > SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedSnapshot { name: envelope.name, version: envelope.version });
        }
        Ok(Some(envelope.state))
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&SnapshotEnvelope::wrap(snapshot))?;
        let tmp = self.temp_path();
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), questions = snapshot.question_count(), "Snapshot written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ── In memory ─────────────────────────────────────────────────────────────────

/// Keeps the last saved snapshot in memory. Clones share the same slot, so a
/// test can hold one clone while the store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    snapshot: Option<StoreSnapshot>,
    saves: usize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been saved earlier.
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        let p = Self::new();
        p.slot().snapshot = Some(snapshot);
        p
    }

    pub fn saved(&self) -> Option<StoreSnapshot> {
        self.slot().snapshot.clone()
    }

    pub fn save_count(&self) -> usize {
        self.slot().saves
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, MemorySlot> {
        // A poisoned slot still holds a usable snapshot
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> Result<Option<StoreSnapshot>> {
        Ok(self.slot().snapshot.clone())
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let mut slot = self.slot();
        slot.snapshot = Some(snapshot.clone());
        slot.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
