use super::load::{default_config_path, default_state_dir, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_env_var() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("AUDIOGLASS_CONFIG_PATH", "/tmp/audioglass-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/audioglass-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("audioglass")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("audioglass")
            .join("config.toml")
    );
}

#[test]
fn state_dir_and_derived_paths_follow_xdg_state_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");

    assert_eq!(
        default_state_dir().unwrap(),
        PathBuf::from("/tmp/xdg-state").join("audioglass")
    );

    let s = Settings::default();
    assert_eq!(
        s.session_path().unwrap(),
        PathBuf::from("/tmp/xdg-state/audioglass/session.json")
    );
    assert_eq!(
        s.log_path().unwrap(),
        PathBuf::from("/tmp/xdg-state/audioglass/audioglass.log")
    );
}

#[test]
fn explicit_session_path_wins_over_state_dir() {
    let s = Settings {
        session: SessionSettings {
            path: Some(PathBuf::from("/srv/session.json")),
            ..SessionSettings::default()
        },
        ..Settings::default()
    };
    assert_eq!(s.session_path().unwrap(), PathBuf::from("/srv/session.json"));
}

#[test]
fn settings_load_from_config_file_and_parse_policy_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
end_of_playlist = "no-loop"
open_mode = "reset"
default_rate = 1.5
min_rate = 0.75
max_rate = 2.0
rate_step = 0.25
volume_step = 0.1
scrub_seconds = 30

[audio]
time_update_ms = 500
quit_fade_out_ms = 0

[library]
extensions = ["m4b"]
recursive = false
include_hidden = true
follow_links = false

[session]
path = "/tmp/audioglass-session.json"
position_save_interval_ms = 5000

[ui]
header_text = "hello"
time_separator = " | "

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("AUDIOGLASS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("AUDIOGLASS__PLAYBACK__SCRUB_SECONDS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.end_of_playlist, EndOfPlaylistSetting::Stop);
    assert_eq!(s.playback.open_mode, OpenModeSetting::Replace);
    assert_eq!(s.playback.default_rate, 1.5);
    assert_eq!(s.playback.min_rate, 0.75);
    assert_eq!(s.playback.max_rate, 2.0);
    assert_eq!(s.playback.rate_step, 0.25);
    assert_eq!(s.playback.volume_step, 0.1);
    assert_eq!(s.playback.scrub_seconds, 30);
    assert_eq!(s.audio.time_update_ms, 500);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.library.extensions, vec!["m4b".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(
        s.session.path,
        Some(PathBuf::from("/tmp/audioglass-session.json"))
    );
    assert_eq!(s.session.position_save_interval_ms, 5000);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.time_separator, " | ");
    assert_eq!(s.logging.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
scrub_seconds = 10
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("AUDIOGLASS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("AUDIOGLASS__PLAYBACK__SCRUB_SECONDS", "45");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.scrub_seconds, 45);
}

#[test]
fn defaults_are_valid_and_accept_audiobook_extensions() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.playback.end_of_playlist, EndOfPlaylistSetting::Wrap);
    assert_eq!(s.playback.open_mode, OpenModeSetting::Append);
    assert_eq!(
        s.library.extensions,
        vec!["mp3", "m4b", "m4a", "flac", "wav", "ogg"]
    );
}

#[test]
fn validate_rejects_inverted_or_non_positive_rate_bounds() {
    let mut s = Settings::default();
    s.playback.min_rate = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.min_rate = 2.0;
    s.playback.max_rate = 1.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.default_rate = 4.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.time_update_ms = 0;
    assert!(s.validate().is_err());
}

#[test]
fn settings_render_back_to_toml() {
    let rendered = toml::to_string_pretty(&Settings::default()).unwrap();
    assert!(rendered.contains("[playback]"));
    assert!(rendered.contains("end_of_playlist = \"wrap\""));
    assert!(rendered.contains("open_mode = \"append\""));
}
