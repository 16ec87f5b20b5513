use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::PlayerError;

use super::snapshot::Snapshot;

/// A single snapshot slot backed by a JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored snapshot. `Ok(None)` when nothing has been saved yet.
    pub fn try_load(&self) -> Result<Option<Snapshot>, PlayerError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Snapshot::from_json(&text).map(Some)
    }

    /// The stored snapshot, or an empty session when there is none or it
    /// cannot be read.
    pub fn load_snapshot(&self) -> Snapshot {
        match self.try_load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("no session at {}", self.path.display());
                Snapshot::default()
            }
            Err(e) => {
                warn!("ignoring session at {}: {e}", self.path.display());
                Snapshot::default()
            }
        }
    }

    /// Replace the stored snapshot. The new content is written next to the
    /// slot and renamed over it, so readers see the old or the new file.
    pub fn save_snapshot(&self, snapshot: &Snapshot) -> Result<(), PlayerError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, snapshot.to_json()?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
