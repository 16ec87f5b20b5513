use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use crate::library::Track;

fn default_rate() -> f32 {
    1.0
}

fn default_volume() -> f32 {
    1.0
}

/// Serialized session: `{tracks, current, coverUrl, rate, pos, volume}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub current: Option<usize>,
    /// Cover of the active track, or empty.
    #[serde(default)]
    pub cover_url: String,
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default)]
    pub pos: f64,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            current: None,
            cover_url: String::new(),
            rate: default_rate(),
            pos: 0.0,
            volume: default_volume(),
        }
    }
}

impl Snapshot {
    /// Parse and validate a stored snapshot.
    pub fn from_json(text: &str) -> Result<Self, PlayerError> {
        let snapshot: Snapshot = serde_json::from_str(text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, PlayerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants a well-formed snapshot must hold.
    pub fn validate(&self) -> Result<(), PlayerError> {
        let corrupt = |msg: String| Err(PlayerError::PersistenceCorrupt(msg));

        match (self.tracks.is_empty(), self.current) {
            (true, Some(i)) => return corrupt(format!("current {i} set on an empty playlist")),
            (false, None) => return corrupt("current missing for a non-empty playlist".into()),
            (false, Some(i)) if i >= self.tracks.len() => {
                return corrupt(format!(
                    "current {i} out of range for {} tracks",
                    self.tracks.len()
                ));
            }
            _ => {}
        }

        if !(self.rate.is_finite() && self.rate > 0.0) {
            return corrupt(format!("rate {} is not a positive number", self.rate));
        }
        if !(self.pos.is_finite() && self.pos >= 0.0) {
            return corrupt(format!("pos {} is not a non-negative number", self.pos));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return corrupt(format!("volume {} outside [0, 1]", self.volume));
        }

        let mut seen = HashSet::with_capacity(self.tracks.len());
        if let Some(dup) = self.tracks.iter().find(|t| !seen.insert(t.id)) {
            return corrupt(format!("duplicate track id {}", dup.id));
        }
        Ok(())
    }
}
