use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "audioglass";

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `AUDIOGLASS__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("AUDIOGLASS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let p = &self.playback;
        if !(p.min_rate.is_finite() && p.min_rate > 0.0) {
            return Err("playback.min_rate must be > 0".to_string());
        }
        if !p.max_rate.is_finite() || p.min_rate > p.max_rate {
            return Err("playback.min_rate must not exceed playback.max_rate".to_string());
        }
        if !(p.min_rate..=p.max_rate).contains(&p.default_rate) {
            return Err("playback.default_rate must lie within [min_rate, max_rate]".to_string());
        }
        if !(p.rate_step.is_finite() && p.rate_step > 0.0) {
            return Err("playback.rate_step must be > 0".to_string());
        }
        if !(p.volume_step.is_finite() && p.volume_step > 0.0) {
            return Err("playback.volume_step must be > 0".to_string());
        }
        if self.audio.time_update_ms == 0 {
            return Err("audio.time_update_ms must be >= 1".to_string());
        }
        Ok(())
    }

    /// Snapshot location: the configured path or `<state dir>/session.json`.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session
            .path
            .clone()
            .or_else(|| default_state_dir().map(|d| d.join("session.json")))
    }

    /// Log file location: the configured path or `<state dir>/audioglass.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging
            .file
            .clone()
            .or_else(|| default_state_dir().map(|d| d.join("audioglass.log")))
    }
}

/// Resolve the config path from `AUDIOGLASS_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("AUDIOGLASS_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/audioglass/config.toml`
/// or `~/.config/audioglass/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Compute the state directory `$XDG_STATE_HOME/audioglass` or
/// `~/.local/state/audioglass`.
pub fn default_state_dir() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join(APP_DIR))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var).filter(|v| !v.is_empty()) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
