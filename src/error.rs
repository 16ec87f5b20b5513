//! Error taxonomy shared by the playlist, controller and session store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The file selector was dismissed. Absorbed by the runtime as a no-op.
    #[error("file selection cancelled")]
    SelectionCancelled,

    #[error("invalid locator {input:?}: {reason}")]
    InvalidLocator { input: String, reason: &'static str },

    #[error("could not play {locator}: {reason}")]
    PlaybackLoad { locator: String, reason: String },

    #[error("session snapshot is corrupt: {0}")]
    PersistenceCorrupt(String),

    #[error("session storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PlayerError {
    fn from(e: serde_json::Error) -> Self {
        Self::PersistenceCorrupt(e.to_string())
    }
}
