//! Application model types: playback state, session values and the
//! policies that resolve the ambiguous end-of-playlist and open-files
//! behaviours.

/// Where the controller is in its state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No track selected; the playlist is empty.
    #[default]
    Idle,
    Paused,
    Playing,
}

/// Observable session values owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Session-wide rate; carried over to every newly loaded track.
    pub playback_rate: f32,
    pub volume: f32,
    /// Last reported position of the active track, in seconds.
    pub last_position: f64,
    /// Duration of the active track once its metadata has loaded.
    pub duration: Option<f64>,
}

impl SessionState {
    pub fn new(playback_rate: f32, volume: f32) -> Self {
        Self {
            playback_rate,
            volume,
            last_position: 0.0,
            duration: None,
        }
    }

    /// Position as a fraction of the duration, when the duration is known.
    pub fn progress(&self) -> Option<f64> {
        self.duration
            .map(|d| (self.last_position / d).clamp(0.0, 1.0))
    }
}

/// What happens when the last track ends.
///
/// Both behaviours exist in the wild: one build wraps to the first track
/// and keeps playing, another stops after the last track. The choice is
/// explicit configuration rather than a guess.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EndOfPlaylist {
    /// Wrap to the first track and keep playing.
    #[default]
    Wrap,
    /// Pause, rewound to the start of the last track.
    Stop,
}

/// How a fresh file selection is merged into the playlist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Append the selection to the existing playlist.
    #[default]
    Append,
    /// Discard the existing playlist and start over with the selection.
    Replace,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaybackPolicy {
    pub end_of_playlist: EndOfPlaylist,
    pub open_mode: OpenMode,
    pub min_rate: f32,
    pub max_rate: f32,
}

impl Default for PlaybackPolicy {
    fn default() -> Self {
        Self {
            end_of_playlist: EndOfPlaylist::default(),
            open_mode: OpenMode::default(),
            min_rate: 0.5,
            max_rate: 3.0,
        }
    }
}

impl PlaybackPolicy {
    pub fn clamp_rate(&self, rate: f32) -> f32 {
        rate.clamp(self.min_rate, self.max_rate)
    }
}

/// A scrub request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Seek {
    /// Normalized position in `0.0..=1.0` of the track duration.
    Fraction(f64),
    /// Absolute position in seconds.
    Seconds(f64),
}
