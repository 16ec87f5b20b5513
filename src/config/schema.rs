use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/audioglass/config.toml` or `~/.config/audioglass/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `AUDIOGLASS__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub audio: AudioSettings,
    pub library: LibrarySettings,
    pub session: SessionSettings,
    pub ui: UiSettings,
    pub logging: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// What happens when the last track ends.
    pub end_of_playlist: EndOfPlaylistSetting,
    /// Whether opening files appends to or replaces the playlist.
    pub open_mode: OpenModeSetting,
    /// Playback rate used when no session has been saved yet.
    pub default_rate: f32,
    pub min_rate: f32,
    pub max_rate: f32,
    /// Rate change per `[` / `]` key press.
    pub rate_step: f32,
    /// Volume change per `-` / `+` key press.
    pub volume_step: f32,
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            end_of_playlist: EndOfPlaylistSetting::Wrap,
            open_mode: OpenModeSetting::Append,
            default_rate: 1.0,
            min_rate: 0.5,
            max_rate: 3.0,
            rate_step: 0.1,
            volume_step: 0.05,
            scrub_seconds: 10,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndOfPlaylistSetting {
    #[serde(alias = "loop", alias = "loop-all", alias = "loop_all", alias = "wrap-around")]
    Wrap,
    #[serde(alias = "no-loop", alias = "no_loop", alias = "halt")]
    Stop,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenModeSetting {
    Append,
    #[serde(alias = "reset")]
    Replace,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the audio thread reports the playback position (milliseconds).
    pub time_update_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            time_update_ms: 250,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions offered by the file selector (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "m4b", "m4a", "flac", "wav", "ogg"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Where the session snapshot lives. Defaults to `<state dir>/session.json`.
    pub path: Option<PathBuf>,
    /// Minimum gap between snapshot writes caused only by position updates.
    pub position_save_interval_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            path: None,
            position_save_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Separator between elapsed and total time in the progress line.
    pub time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " Audiobooks Glass ".to_string(),
            time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `env_logger` filter string, e.g. `info` or `audioglass=debug`.
    pub level: String,
    /// Log file. Defaults to `<state dir>/audioglass.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
