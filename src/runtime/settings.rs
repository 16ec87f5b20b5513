use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("audioglass: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("audioglass: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// Render the effective settings for `--print-config`.
pub fn render_settings(settings: &config::Settings) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(settings)
}
