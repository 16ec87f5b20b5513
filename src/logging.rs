//! File-backed logging.
//!
//! The terminal belongs to the UI, so records go to a log file instead of
//! stderr. `AUDIOGLASS_LOG` takes `env_logger` filter syntax and overrides
//! the configured level.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use env_logger::{Builder, Target};

use crate::config::LogSettings;

pub const LOG_ENV: &str = "AUDIOGLASS_LOG";

/// Install the global logger. Falls back to stderr when the log file
/// cannot be opened; a second call is a no-op.
pub fn init(settings: &LogSettings, file: Option<PathBuf>) {
    let mut builder = Builder::new();
    builder.parse_filters(&settings.level).parse_env(LOG_ENV);

    match file {
        Some(path) => {
            let opened = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| OpenOptions::new().create(true).append(true).open(&path));
            match opened {
                Ok(f) => {
                    builder.target(Target::Pipe(Box::new(f)));
                }
                Err(e) => eprintln!("cannot open log file {}: {e}", path.display()),
            }
        }
        None => eprintln!("no state directory; logging to stderr"),
    }

    if builder.try_init().is_ok() {
        log::info!("audioglass {} starting", env!("CARGO_PKG_VERSION"));
    }
}
