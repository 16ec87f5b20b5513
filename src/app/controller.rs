//! The playback controller: sole mutator of the playlist and session.
//!
//! User intents arrive as method calls, audio feedback as `AudioEvent`s.
//! Each load is tagged with a fresh `LoadStamp`; feedback whose stamp does
//! not match the active load belongs to a superseded track and is dropped.

use log::{debug, info, warn};

use crate::audio::{AudioElement, AudioEvent, AudioEventKind, LoadStamp};
use crate::error::PlayerError;
use crate::library::{FileEntry, Locator, Track, TrackId};
use crate::playlist::Playlist;
use crate::session::Snapshot;

use super::model::{EndOfPlaylist, OpenMode, PlaybackPolicy, PlaybackState, Seek, SessionState};

pub struct PlaybackController<A: AudioElement> {
    playlist: Playlist,
    state: PlaybackState,
    session: SessionState,
    policy: PlaybackPolicy,
    audio: A,

    generation: u64,
    loaded: Option<LoadStamp>,
    /// Saved position applied once, when the restored track's metadata arrives.
    pending_restore: Option<f64>,
    notice: Option<PlayerError>,

    revision: u64,
    position_revision: u64,
}

impl<A: AudioElement> PlaybackController<A> {
    /// A controller with an empty playlist.
    pub fn new(audio: A, policy: PlaybackPolicy, rate: f32) -> Self {
        let rate = if rate.is_finite() { policy.clamp_rate(rate) } else { 1.0 };
        Self {
            playlist: Playlist::new(),
            state: PlaybackState::Idle,
            session: SessionState::new(rate, 1.0),
            policy,
            audio,
            generation: 0,
            loaded: None,
            pending_restore: None,
            notice: None,
            revision: 0,
            position_revision: 0,
        }
    }

    /// Rebuild the session from a snapshot. The restored track is loaded
    /// paused and the saved position is applied once its metadata loads.
    pub fn restore(snapshot: Snapshot, audio: A, policy: PlaybackPolicy) -> Self {
        let mut c = Self::new(audio, policy, snapshot.rate);
        c.session.volume = snapshot.volume.clamp(0.0, 1.0);
        c.playlist = Playlist::from_parts(snapshot.tracks, snapshot.current);

        if !snapshot.cover_url.is_empty() {
            if let Some(track) = c.playlist.current_track() {
                if track.cover_url.is_none() {
                    let id = track.id;
                    c.playlist.set_cover(id, snapshot.cover_url);
                }
            }
        }

        if c.playlist.current().is_some() {
            c.state = PlaybackState::Paused;
            c.session.last_position = snapshot.pos.max(0.0);
            c.pending_restore = (snapshot.pos > 0.0).then_some(snapshot.pos);
            c.load_current();
        }

        info!(
            "restored session: {} tracks, current {:?}, position {:.1}s",
            c.playlist.len(),
            c.playlist.current(),
            c.session.last_position
        );
        c
    }

    /// Capture everything needed to rebuild this session after a restart.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tracks: self.playlist.tracks().to_vec(),
            current: self.playlist.current(),
            cover_url: self
                .playlist
                .current_track()
                .and_then(|t| t.cover_url.clone())
                .unwrap_or_default(),
            rate: self.session.playback_rate,
            pos: self.session.last_position,
            volume: self.session.volume,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn policy(&self) -> &PlaybackPolicy {
        &self.policy
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.current_track()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Bumped on every change other than position feedback.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bumped on every position change.
    pub fn position_revision(&self) -> u64 {
        self.position_revision
    }

    /// Take the pending notice for the presentation layer, if any.
    pub fn take_notice(&mut self) -> Option<PlayerError> {
        self.notice.take()
    }

    // ---- playlist intents ----

    /// Append selected files. Loads the first of them when nothing was
    /// selected before. Returns how many tracks were added.
    pub fn add_tracks(&mut self, entries: Vec<FileEntry>) -> usize {
        if entries.is_empty() {
            return 0;
        }
        let was_idle = self.playlist.current().is_none();
        let added = self.playlist.add_tracks(entries).len();
        if was_idle && self.playlist.current().is_some() {
            self.state = PlaybackState::Paused;
            self.session.last_position = 0.0;
            self.load_current();
        }
        self.touch();
        added
    }

    /// Replace the playlist with `entries`. Play/pause state carries over to
    /// the first new track; an empty selection leaves the controller idle.
    pub fn replace_all(&mut self, entries: Vec<FileEntry>) -> usize {
        let added = self.playlist.replace_all(entries).len();
        self.pending_restore = None;
        if self.playlist.current().is_some() {
            if self.state == PlaybackState::Idle {
                self.state = PlaybackState::Paused;
            }
            self.session.last_position = 0.0;
            self.load_current();
        } else {
            self.go_idle();
        }
        self.touch();
        added
    }

    /// Apply a file selection according to the configured `OpenMode`.
    pub fn open_files(&mut self, entries: Vec<FileEntry>) -> usize {
        match self.policy.open_mode {
            OpenMode::Append => self.add_tracks(entries),
            // An empty selection is a cancel, never a reason to wipe the playlist.
            OpenMode::Replace if entries.is_empty() => 0,
            OpenMode::Replace => self.replace_all(entries),
        }
    }

    /// Append a manually entered locator. `title` defaults to the last
    /// segment of the locator.
    pub fn add_track_by_locator(
        &mut self,
        locator: Locator,
        title: Option<String>,
        cover_url: Option<String>,
    ) -> TrackId {
        let was_idle = self.playlist.current().is_none();
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| locator.title_hint());
        let id = self.playlist.add_track_by_locator(locator, title, cover_url).id;
        if was_idle {
            self.state = PlaybackState::Paused;
            self.session.last_position = 0.0;
            self.load_current();
        }
        self.touch();
        id
    }

    /// Set one track's cover. Unknown ids are ignored.
    pub fn set_cover(&mut self, id: TrackId, url: String) -> bool {
        let changed = self.playlist.set_cover(id, url);
        if changed {
            self.touch();
        } else {
            debug!("set_cover: no track {id}");
        }
        changed
    }

    /// Set the cover of the active track, if there is one.
    pub fn set_current_cover(&mut self, url: String) -> bool {
        match self.playlist.current_track().map(|t| t.id) {
            Some(id) => self.set_cover(id, url),
            None => false,
        }
    }

    /// Remove a track. Removing the active track loads whichever track the
    /// clamped cursor lands on, keeping play/pause state.
    pub fn remove_track(&mut self, id: TrackId) -> bool {
        let active = self.playlist.current_track().map(|t| t.id);
        if self.playlist.remove(id).is_none() {
            return false;
        }

        if self.playlist.is_empty() {
            self.go_idle();
        } else if active == Some(id) {
            self.pending_restore = None;
            self.session.last_position = 0.0;
            self.load_current();
        }
        self.touch();
        true
    }

    // ---- transport ----

    /// Make `index` the active track. Out-of-range indices are ignored.
    /// Play/pause state is preserved; the position starts at zero.
    pub fn select_track(&mut self, index: usize) -> bool {
        if !self.playlist.set_current(index) {
            debug!("select_track: index {index} out of range");
            return false;
        }
        self.pending_restore = None;
        self.session.last_position = 0.0;
        if self.state == PlaybackState::Idle {
            self.state = PlaybackState::Paused;
        }
        self.load_current();
        self.touch();
        true
    }

    pub fn toggle_playback(&mut self) {
        match self.state {
            PlaybackState::Idle => debug!("toggle_playback: nothing loaded"),
            PlaybackState::Paused if self.loaded.is_none() => {
                debug!("toggle_playback: current track failed to load");
            }
            PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                self.audio.play();
                self.touch();
            }
            PlaybackState::Playing => {
                self.state = PlaybackState::Paused;
                self.audio.pause();
                self.touch();
            }
        }
    }

    /// Advance to the next track, wrapping past the end.
    pub fn next(&mut self) {
        if let Some(cur) = self.playlist.current() {
            self.select_track((cur + 1) % self.playlist.len());
        }
    }

    /// Step back to the previous track, wrapping before the start.
    pub fn previous(&mut self) {
        if let Some(cur) = self.playlist.current() {
            let len = self.playlist.len();
            self.select_track((cur + len - 1) % len);
        }
    }

    /// End-of-media handling, resolved by `EndOfPlaylist`.
    pub fn on_track_ended(&mut self) {
        let Some(cur) = self.playlist.current() else {
            return;
        };
        let last = cur + 1 >= self.playlist.len();

        match (self.policy.end_of_playlist, last) {
            (EndOfPlaylist::Stop, true) => {
                info!("playlist finished");
                self.state = PlaybackState::Paused;
                self.pending_restore = None;
                self.session.last_position = 0.0;
                // The drained source cannot be replayed; load it again, paused.
                self.load_current();
                self.touch();
            }
            // Play/pause carries over, so a pause that raced the end of
            // the track is kept on the next one.
            _ => self.next(),
        }
    }

    /// Scrub the active track. Fractions need a known duration and are
    /// ignored until the metadata has loaded.
    pub fn seek(&mut self, seek: Seek) -> bool {
        if self.loaded.is_none() {
            return false;
        }
        let target = match seek {
            Seek::Fraction(f) => {
                let Some(duration) = self.session.duration else {
                    debug!("seek: duration unknown, ignoring {f}");
                    return false;
                };
                if !f.is_finite() {
                    return false;
                }
                f.clamp(0.0, 1.0) * duration
            }
            Seek::Seconds(s) => {
                if !s.is_finite() {
                    return false;
                }
                let s = s.max(0.0);
                self.session.duration.map_or(s, |d| s.min(d))
            }
        };

        self.audio.seek(target);
        self.session.last_position = target;
        self.position_revision += 1;
        true
    }

    /// Scrub relative to the last known position.
    pub fn seek_by(&mut self, delta: f64) -> bool {
        self.seek(Seek::Seconds(self.session.last_position + delta))
    }

    /// Clamp and apply a playback rate. Returns the rate in effect.
    pub fn set_playback_rate(&mut self, rate: f32) -> f32 {
        if rate.is_finite() {
            let rate = self.policy.clamp_rate(rate);
            if rate != self.session.playback_rate {
                self.session.playback_rate = rate;
                if self.loaded.is_some() {
                    self.audio.set_rate(rate);
                }
                self.touch();
            }
        }
        self.session.playback_rate
    }

    /// Clamp and apply a volume in `[0, 1]`. Returns the volume in effect.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        if volume.is_finite() {
            let volume = volume.clamp(0.0, 1.0);
            if volume != self.session.volume {
                self.session.volume = volume;
                if self.loaded.is_some() {
                    self.audio.set_volume(volume);
                }
                self.touch();
            }
        }
        self.session.volume
    }

    /// Position feedback. Only records; never issues a seek.
    pub fn on_time_update(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds >= 0.0 {
            self.session.last_position = seconds;
            self.position_revision += 1;
        }
    }

    // ---- audio feedback ----

    /// Route one event from the audio element. Events from superseded
    /// loads are dropped.
    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        if self.loaded != Some(event.stamp) {
            debug!(
                "dropping stale {:?} for generation {}",
                event.kind, event.stamp.generation
            );
            return;
        }

        match event.kind {
            AudioEventKind::TimeUpdated(t) => self.on_time_update(t),
            AudioEventKind::Ended => self.on_track_ended(),
            AudioEventKind::MetadataLoaded(d) => self.on_metadata_loaded(d),
            AudioEventKind::LoadFailed(reason) => self.on_load_failed(reason),
        }
    }

    fn on_metadata_loaded(&mut self, duration: Option<f64>) {
        self.session.duration = duration.filter(|d| d.is_finite() && *d > 0.0);

        if let Some(pos) = self.pending_restore.take() {
            let pos = self.session.duration.map_or(pos, |d| pos.min(d));
            debug!("restoring position {pos:.1}s");
            self.audio.seek(pos);
            self.session.last_position = pos;
            self.position_revision += 1;
        }
    }

    fn on_load_failed(&mut self, reason: String) {
        let locator = self
            .playlist
            .current_track()
            .map(|t| t.locator.to_string())
            .unwrap_or_default();
        warn!("playback failed for {locator}: {reason}");

        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.audio.pause();
        }
        // Nothing is playable until another track is loaded.
        self.loaded = None;
        self.pending_restore = None;
        self.notice = Some(PlayerError::PlaybackLoad { locator, reason });
        self.touch();
    }

    fn load_current(&mut self) {
        let Some(track) = self.playlist.current_track() else {
            self.go_idle();
            return;
        };

        self.generation += 1;
        let stamp = LoadStamp {
            generation: self.generation,
            track: track.id,
        };
        debug!("loading {} as generation {}", track.locator, stamp.generation);

        self.loaded = Some(stamp);
        self.session.duration = None;
        self.audio.load(stamp, &track.locator);
        self.audio.set_rate(self.session.playback_rate);
        self.audio.set_volume(self.session.volume);
        if self.state == PlaybackState::Playing {
            self.audio.play();
        }
    }

    fn go_idle(&mut self) {
        if self.loaded.take().is_some() {
            self.audio.unload();
        }
        self.state = PlaybackState::Idle;
        self.pending_restore = None;
        self.session.last_position = 0.0;
        self.session.duration = None;
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
