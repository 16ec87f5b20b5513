//! Audio-related small types.
//!
//! This module defines the commands sent to the audio thread and the
//! events it sends back.

use std::path::PathBuf;

use crate::library::{Locator, TrackId};

/// Identifies one `load` issued by the controller. Every event produced for
/// that load carries the same stamp.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadStamp {
    pub generation: u64,
    pub track: TrackId,
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Open `locator` paused, replacing whatever was loaded.
    Load { stamp: LoadStamp, locator: Locator },
    /// Drop the current source.
    Unload,
    Play,
    Pause,
    /// Seek to an absolute position in seconds.
    Seek(f64),
    SetRate(f32),
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioEventKind {
    /// Current playback position in seconds.
    TimeUpdated(f64),
    /// The source played to its end.
    Ended,
    /// The source is ready; carries its duration in seconds when known.
    MetadataLoaded(Option<f64>),
    /// The source could not be opened or decoded.
    LoadFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioEvent {
    pub stamp: LoadStamp,
    pub kind: AudioEventKind,
}

impl AudioEvent {
    pub fn new(stamp: LoadStamp, kind: AudioEventKind) -> Self {
        Self { stamp, kind }
    }
}

/// Map a locator to a file the backend can open. Remote locators are
/// rejected with a reason suitable for a `LoadFailed` event.
pub(crate) fn playable_path(locator: &Locator) -> Result<PathBuf, String> {
    match locator.to_file_path() {
        Some(path) => Ok(path),
        None => Err(format!(
            "streaming from {} is not supported; download the file first",
            locator.as_str().split(':').next().unwrap_or("this source")
        )),
    }
}
