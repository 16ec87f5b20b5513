use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::library::Locator;

use super::sink::create_sink;
use super::types::{AudioCmd, AudioEvent, AudioEventKind, LoadStamp, playable_path};

/// The source currently owned by the audio thread.
struct Loaded {
    stamp: LoadStamp,
    sink: Sink,
    playing: bool,
    ended: bool,
}

/// Deliver one event to the controller. Returns false once the receiver is gone.
pub(super) fn send_event(events: &Sender<AudioEvent>, stamp: LoadStamp, kind: AudioEventKind) -> bool {
    match events.send(AudioEvent::new(stamp, kind)) {
        Ok(()) => true,
        Err(e) => {
            debug!("event receiver is gone, dropping {:?}", e.0.kind);
            false
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!("no audio output device: {e}");
                None
            }
        };

        let tick = Duration::from_millis(audio_settings.time_update_ms.max(1));
        let mut last_tick = Instant::now();

        let mut current: Option<Loaded> = None;
        let mut rate: f32 = 1.0;
        let mut volume: f32 = 1.0;

        let emit = |stamp: LoadStamp, kind: AudioEventKind| {
            send_event(&events, stamp, kind);
        };

        fn open(stream: Option<&OutputStream>, locator: &Locator) -> Result<(Sink, Option<Duration>), String> {
            let stream = stream.ok_or_else(|| "no audio output device".to_string())?;
            let path = playable_path(locator)?;
            create_sink(stream, &path)
        }

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64, from: f32) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(from * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            let wait = tick.saturating_sub(last_tick.elapsed());
            match rx.recv_timeout(wait) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { stamp, locator } => {
                        if let Some(old) = current.take() {
                            old.sink.stop();
                        }
                        match open(stream.as_ref(), &locator) {
                            Ok((sink, duration)) => {
                                sink.set_speed(rate);
                                sink.set_volume(volume);
                                info!("loaded {locator} (duration {duration:?})");
                                emit(
                                    stamp,
                                    AudioEventKind::MetadataLoaded(duration.map(|d| d.as_secs_f64())),
                                );
                                current = Some(Loaded {
                                    stamp,
                                    sink,
                                    playing: false,
                                    ended: false,
                                });
                            }
                            Err(reason) => {
                                warn!("load failed for {locator}: {reason}");
                                emit(stamp, AudioEventKind::LoadFailed(reason));
                            }
                        }
                    }

                    AudioCmd::Unload => {
                        if let Some(old) = current.take() {
                            old.sink.stop();
                        }
                    }

                    AudioCmd::Play => {
                        if let Some(l) = current.as_mut() {
                            if l.ended {
                                // A drained sink has nothing left to play; the
                                // controller reloads the track to start over.
                                debug!("play ignored, source already ended");
                                continue;
                            }
                            l.sink.play();
                            l.playing = true;
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(l) = current.as_mut() {
                            l.sink.pause();
                            l.playing = false;
                            emit(l.stamp, AudioEventKind::TimeUpdated(l.sink.get_pos().as_secs_f64()));
                        }
                    }

                    AudioCmd::Seek(secs) => {
                        if let Some(l) = current.as_mut() {
                            let target = Duration::from_secs_f64(secs.max(0.0));
                            match l.sink.try_seek(target) {
                                Ok(()) => {
                                    l.ended = false;
                                    emit(l.stamp, AudioEventKind::TimeUpdated(target.as_secs_f64()));
                                }
                                Err(e) => warn!("seek to {secs:.1}s failed: {e}"),
                            }
                        }
                    }

                    AudioCmd::SetRate(r) => {
                        rate = r;
                        if let Some(l) = current.as_ref() {
                            l.sink.set_speed(r);
                        }
                    }

                    AudioCmd::SetVolume(v) => {
                        volume = v;
                        if let Some(l) = current.as_ref() {
                            l.sink.set_volume(v);
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(l) = current.take() {
                            if l.playing {
                                fade_out_sink(&l.sink, fade_out_ms, volume);
                            }
                            l.sink.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if last_tick.elapsed() >= tick {
                last_tick = Instant::now();
                if let Some(l) = current.as_mut() {
                    if l.playing && !l.ended {
                        if l.sink.empty() {
                            l.ended = true;
                            l.playing = false;
                            emit(l.stamp, AudioEventKind::Ended);
                        } else {
                            emit(l.stamp, AudioEventKind::TimeUpdated(l.sink.get_pos().as_secs_f64()));
                        }
                    }
                }
            }
        }
    })
}
