use std::collections::HashSet;

use log::warn;

use crate::library::{FileEntry, Locator, Track, TrackId};

/// Ordered, mutable sequence of tracks. Insertion order is playback order
/// and duplicates by title or path are allowed; identity is the `TrackId`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a playlist from stored parts, clamping `current` into bounds.
    pub fn from_parts(tracks: Vec<Track>, current: Option<usize>) -> Self {
        let mut playlist = Self { tracks, current };
        playlist.clamp_cursor();
        playlist
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Append one track per selected file. Selects the first new track when
    /// nothing was selected. Returns the newly added tracks.
    pub fn add_tracks(&mut self, entries: Vec<FileEntry>) -> &[Track] {
        let start = self.tracks.len();
        for entry in entries {
            let locator = match Locator::from_path(&entry.path) {
                Ok(l) => l,
                Err(e) => {
                    warn!("skipping selected file: {e}");
                    continue;
                }
            };
            let id = self.fresh_id();
            self.tracks.push(Track {
                id,
                title: entry.display_name,
                locator,
                cover_url: None,
            });
        }
        self.select_first_new(start)
    }

    /// Append a single manually specified locator.
    pub fn add_track_by_locator(
        &mut self,
        locator: Locator,
        title: String,
        cover_url: Option<String>,
    ) -> &Track {
        let start = self.tracks.len();
        let id = self.fresh_id();
        self.tracks.push(Track {
            id,
            title,
            locator,
            cover_url,
        });
        &self.select_first_new(start)[0]
    }

    /// Update one track's cover. Returns `false`, leaving everything as is,
    /// when no track has `id`.
    pub fn set_cover(&mut self, id: TrackId, url: String) -> bool {
        match self.tracks.iter_mut().find(|t| t.id == id) {
            Some(track) => {
                track.cover_url = Some(url);
                true
            }
            None => false,
        }
    }

    /// Discard the playlist and start over with `entries`. The cursor moves
    /// to the first new track, or `None` when nothing was added.
    pub fn replace_all(&mut self, entries: Vec<FileEntry>) -> &[Track] {
        self.tracks.clear();
        self.current = None;
        self.add_tracks(entries)
    }

    /// Remove the track with `id`, returning it. The cursor keeps pointing
    /// at the same track when that track survives; otherwise it is clamped.
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let index = self.position_of(id)?;
        let removed = self.tracks.remove(index);
        self.current = match self.current {
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        self.clamp_cursor();
        Some(removed)
    }

    /// Move the cursor. Rejects out-of-range indices and leaves the cursor
    /// untouched in that case.
    pub(crate) fn set_current(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    fn select_first_new(&mut self, start: usize) -> &[Track] {
        if self.current.is_none() && start < self.tracks.len() {
            self.current = Some(start);
        }
        self.clamp_cursor();
        &self.tracks[start..]
    }

    fn clamp_cursor(&mut self) {
        self.current = if self.tracks.is_empty() {
            None
        } else {
            Some(self.current.unwrap_or(0).min(self.tracks.len() - 1))
        };
    }

    fn fresh_id(&self) -> TrackId {
        let taken: HashSet<TrackId> = self.tracks.iter().map(|t| t.id).collect();
        loop {
            let id = TrackId::random();
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}
