use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use log::warn;

use crate::config::AudioSettings;
use crate::library::Locator;

use super::element::AudioElement;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, LoadStamp};

/// rodio-backed audio element. Commands go to a dedicated thread; events
/// come back on the `events` sender handed to `new`.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings, events: Sender<AudioEvent>) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let audio_handle = spawn_audio_thread(rx, events, audio_settings);

        Self {
            tx,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!("audio thread is gone, dropping {:?}", e.0);
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl AudioElement for AudioPlayer {
    fn load(&mut self, stamp: LoadStamp, locator: &Locator) {
        self.send(AudioCmd::Load {
            stamp,
            locator: locator.clone(),
        });
    }

    fn unload(&mut self) {
        self.send(AudioCmd::Unload);
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.send(AudioCmd::Seek(seconds));
    }

    fn set_rate(&mut self, rate: f32) {
        self.send(AudioCmd::SetRate(rate));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }
}
