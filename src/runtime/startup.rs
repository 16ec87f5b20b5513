use std::path::PathBuf;
use std::time::Duration;

use log::warn;

use crate::app::{EndOfPlaylist, OpenMode, PlaybackPolicy};
use crate::config;
use crate::session::{Autosave, Snapshot, SnapshotStore};

/// Translate the `[playback]` section into the controller's policy.
pub fn playback_policy(settings: &config::Settings) -> PlaybackPolicy {
    let p = &settings.playback;
    PlaybackPolicy {
        end_of_playlist: match p.end_of_playlist {
            config::EndOfPlaylistSetting::Wrap => EndOfPlaylist::Wrap,
            config::EndOfPlaylistSetting::Stop => EndOfPlaylist::Stop,
        },
        open_mode: match p.open_mode {
            config::OpenModeSetting::Append => OpenMode::Append,
            config::OpenModeSetting::Replace => OpenMode::Replace,
        },
        min_rate: p.min_rate,
        max_rate: p.max_rate,
    }
}

/// Open the snapshot slot and read the last session. Without a state
/// directory the session starts empty and is kept in the working directory.
pub fn restore_session(settings: &config::Settings) -> (Autosave, Snapshot) {
    let path = settings.session_path().unwrap_or_else(|| {
        warn!("no state directory; keeping the session in ./session.json");
        PathBuf::from("session.json")
    });
    let store = SnapshotStore::new(path);

    let mut snapshot = store.load_snapshot();
    if snapshot.tracks.is_empty() {
        // A fresh session starts at the configured rate.
        snapshot.rate = settings.playback.default_rate;
    }

    let interval = Duration::from_millis(settings.session.position_save_interval_ms);
    (Autosave::new(store, interval), snapshot)
}

/// Directory the file picker starts in: the first argument, else the
/// current directory. Relative arguments are resolved against the
/// current directory.
pub fn start_dir(arg: Option<String>) -> PathBuf {
    match arg {
        Some(arg) => {
            let dir = PathBuf::from(arg);
            std::path::absolute(&dir).unwrap_or(dir)
        }
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
