use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::display::display_name;
use super::locator::Locator;

/// Opaque track identity. Two tracks pointing at the same file are still
/// distinct entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(u64);

impl TrackId {
    /// Draw a fresh random id. Callers that need uniqueness against an
    /// existing set must check for collisions themselves.
    pub fn random() -> Self {
        Self(rand::random())
    }

    #[cfg(test)]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// One playable item in the playlist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    #[serde(rename = "sourceLocator")]
    pub locator: Locator,
    #[serde(default)]
    pub cover_url: Option<String>,
}

/// A file returned by the file selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub display_name: String,
}

impl FileEntry {
    pub fn from_path(path: PathBuf) -> Self {
        let display_name = display_name(&path);
        Self { path, display_name }
    }
}
