use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PlayerError;

const ACCEPTED_SCHEMES: [&str; 3] = ["file", "http", "https"];

/// Where a track's audio lives: a `file://` URL for local files or an
/// `http(s)://` URL for remote ones. Opaque to the controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locator(Url);

fn invalid(input: &str, reason: &'static str) -> PlayerError {
    PlayerError::InvalidLocator {
        input: input.to_string(),
        reason,
    }
}

impl Locator {
    /// Resolve an absolute filesystem path into a `file://` locator.
    pub fn from_path(path: &Path) -> Result<Self, PlayerError> {
        let shown = path.display().to_string();
        if !path.is_absolute() {
            return Err(invalid(&shown, "path must be absolute"));
        }
        Url::from_file_path(path)
            .map(Self)
            .map_err(|_| invalid(&shown, "path cannot be expressed as a URL"))
    }

    /// Validate user-entered text. Accepts absolute paths and `file`,
    /// `http` and `https` URLs.
    pub fn parse(input: &str) -> Result<Self, PlayerError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "locator is empty"));
        }

        let as_path = Path::new(trimmed);
        if as_path.is_absolute() {
            return Self::from_path(as_path);
        }

        let url = Url::parse(trimmed).map_err(|_| invalid(input, "not a URL or absolute path"))?;
        if !ACCEPTED_SCHEMES.contains(&url.scheme()) {
            return Err(invalid(input, "unsupported scheme"));
        }
        if url.scheme() != "file" && url.host_str().is_none_or(str::is_empty) {
            return Err(invalid(input, "URL has no host"));
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Local path behind a `file://` locator.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.0.scheme() == "file" {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    /// Default title for a manually entered locator: the last path segment.
    pub fn title_hint(&self) -> String {
        if let Some(name) = self
            .to_file_path()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        {
            return name;
        }

        self.0
            .path_segments()
            .and_then(|mut segs| segs.rfind(|s| !s.is_empty()))
            .map(str::to_string)
            .or_else(|| self.0.host_str().map(str::to_string))
            .unwrap_or_else(|| self.0.to_string())
    }
}

impl TryFrom<String> for Locator {
    type Error = PlayerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locator> for String {
    fn from(value: Locator) -> Self {
        value.0.into()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Validate a cover image URL before it reaches the playlist.
pub fn validate_cover_url(input: &str) -> Result<String, PlayerError> {
    Locator::parse(input).map(String::from)
}
