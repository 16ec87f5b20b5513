//! A recording `AudioElement` for tests that do not need a sound device.

use crate::library::Locator;

use super::element::AudioElement;
use super::types::LoadStamp;

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Load(LoadStamp, String),
    Unload,
    Play,
    Pause,
    Seek(f64),
    Rate(f32),
    Volume(f32),
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub commands: Vec<Recorded>,
}

impl RecordingAudio {
    /// Stamp of the most recent load, if any.
    pub fn last_stamp(&self) -> Option<LoadStamp> {
        self.commands.iter().rev().find_map(|c| match c {
            Recorded::Load(stamp, _) => Some(*stamp),
            _ => None,
        })
    }

    pub fn take(&mut self) -> Vec<Recorded> {
        std::mem::take(&mut self.commands)
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Recorded::Seek(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl AudioElement for RecordingAudio {
    fn load(&mut self, stamp: LoadStamp, locator: &Locator) {
        self.commands
            .push(Recorded::Load(stamp, locator.as_str().to_string()));
    }

    fn unload(&mut self) {
        self.commands.push(Recorded::Unload);
    }

    fn play(&mut self) {
        self.commands.push(Recorded::Play);
    }

    fn pause(&mut self) {
        self.commands.push(Recorded::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.commands.push(Recorded::Seek(seconds));
    }

    fn set_rate(&mut self, rate: f32) {
        self.commands.push(Recorded::Rate(rate));
    }

    fn set_volume(&mut self, volume: f32) {
        self.commands.push(Recorded::Volume(volume));
    }
}
