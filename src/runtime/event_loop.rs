use std::mem;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{PlaybackController, Seek};
use crate::audio::{AudioElement, AudioEvent};
use crate::config;
use crate::error::PlayerError;
use crate::library::FilePicker;
use crate::session::Autosave;
use crate::ui;

use super::prompt::{Prompt, PromptOutcome};

/// What keystrokes are currently routed to.
pub enum InputMode {
    Normal,
    Picker(FilePicker),
    Prompt(Prompt),
}

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Highlighted row in the playlist; independent of the active track.
    pub cursor: usize,
    pub mode: InputMode,
    /// One-line message for the user; cleared by the next key press.
    pub notice: Option<String>,
    /// Directory the file picker scans.
    pub start_dir: PathBuf,
    /// Active track as of the last iteration, used to move the cursor along.
    last_current: Option<usize>,
}

impl EventLoopState {
    pub fn new<A: AudioElement>(controller: &PlaybackController<A>, start_dir: PathBuf) -> Self {
        let current = controller.playlist().current();
        Self {
            cursor: current.unwrap_or(0),
            mode: InputMode::Normal,
            notice: None,
            start_dir,
            last_current: current,
        }
    }

    /// Keep the cursor on the list and let it follow track changes.
    fn sync_cursor<A: AudioElement>(&mut self, controller: &PlaybackController<A>) {
        let current = controller.playlist().current();
        if current != self.last_current {
            if let Some(i) = current {
                self.cursor = i;
            }
            self.last_current = current;
        }
        let len = controller.playlist().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

/// Main terminal event loop: drains audio feedback, autosaves, draws and
/// handles one key at a time. Returns `Ok(())` when quit is requested.
pub fn run<A: AudioElement>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut PlaybackController<A>,
    audio_events: &mpsc::Receiver<AudioEvent>,
    autosave: &mut Autosave,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = audio_events.try_recv() {
            controller.handle_audio_event(ev);
        }
        if let Some(notice) = controller.take_notice() {
            state.notice = Some(notice.to_string());
        }
        autosave.tick(controller);
        state.sync_cursor(controller);

        terminal.draw(|f| ui::draw(f, &*controller, &*state, &settings.ui, &settings.playback))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, controller, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Route one key press. Returns `true` when the user asked to quit.
pub fn handle_key_event<A: AudioElement>(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut PlaybackController<A>,
    state: &mut EventLoopState,
) -> bool {
    match mem::replace(&mut state.mode, InputMode::Normal) {
        InputMode::Normal => {
            state.notice = None;
            handle_normal_key(key, settings, controller, state)
        }
        InputMode::Picker(picker) => {
            handle_picker_key(key, picker, controller, state);
            false
        }
        InputMode::Prompt(prompt) => {
            handle_prompt_key(key, prompt, controller, state);
            false
        }
    }
}

fn handle_normal_key<A: AudioElement>(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut PlaybackController<A>,
    state: &mut EventLoopState,
) -> bool {
    let p = &settings.playback;
    let len = controller.playlist().len();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            if len > 0 {
                state.cursor = (state.cursor + 1) % len;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if len > 0 {
                state.cursor = (state.cursor + len - 1) % len;
            }
        }
        KeyCode::Enter => {
            controller.select_track(state.cursor);
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => controller.toggle_playback(),
        KeyCode::Char('l') => controller.next(),
        KeyCode::Char('h') => controller.previous(),
        KeyCode::Char('L') => {
            controller.seek_by(p.scrub_seconds as f64);
        }
        KeyCode::Char('H') => {
            controller.seek_by(-(p.scrub_seconds as f64));
        }
        KeyCode::Char(c @ '0'..='9') => {
            let fraction = f64::from(c.to_digit(10).unwrap_or(0)) / 10.0;
            if !controller.seek(Seek::Fraction(fraction)) {
                state.notice = Some("duration not known yet".to_string());
            }
        }
        KeyCode::Char(']') => {
            let rate = round_step(controller.session().playback_rate + p.rate_step);
            controller.set_playback_rate(rate);
        }
        KeyCode::Char('[') => {
            let rate = round_step(controller.session().playback_rate - p.rate_step);
            controller.set_playback_rate(rate);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let volume = round_step(controller.session().volume + p.volume_step);
            controller.set_volume(volume);
        }
        KeyCode::Char('-') => {
            let volume = round_step(controller.session().volume - p.volume_step);
            controller.set_volume(volume);
        }
        KeyCode::Char('o') => {
            let picker = FilePicker::open(&state.start_dir, &settings.library);
            if picker.entries().is_empty() {
                state.notice = Some(format!("no audio files under {}", state.start_dir.display()));
            }
            state.mode = InputMode::Picker(picker);
        }
        KeyCode::Char('u') => state.mode = InputMode::Prompt(Prompt::track_url()),
        KeyCode::Char('c') => {
            if controller.current_track().is_some() {
                state.mode = InputMode::Prompt(Prompt::current_cover());
            } else {
                state.notice = Some("no track selected".to_string());
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = controller.playlist().get(state.cursor).map(|t| t.id) {
                controller.remove_track(id);
            }
        }
        _ => {}
    }

    false
}

fn handle_picker_key<A: AudioElement>(
    key: KeyEvent,
    mut picker: FilePicker,
    controller: &mut PlaybackController<A>,
    state: &mut EventLoopState,
) {
    let selection = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => picker.cancel(),
        KeyCode::Enter => picker.confirm(),
        code => {
            match code {
                KeyCode::Char('j') | KeyCode::Down => picker.next(),
                KeyCode::Char('k') | KeyCode::Up => picker.prev(),
                KeyCode::Char(' ') => picker.toggle_mark(),
                KeyCode::Char('a') => picker.toggle_all(),
                _ => {}
            }
            state.mode = InputMode::Picker(picker);
            return;
        }
    };

    match selection {
        Ok(entries) => {
            let selected = entries.len();
            let added = controller.open_files(entries);
            state.notice = Some(if added < selected {
                format!("added {added} of {selected} track(s); see the log for skipped files")
            } else {
                format!("added {added} track(s)")
            });
        }
        Err(PlayerError::SelectionCancelled) => debug!("file selection cancelled"),
        Err(e) => state.notice = Some(e.to_string()),
    }
}

fn handle_prompt_key<A: AudioElement>(
    key: KeyEvent,
    mut prompt: Prompt,
    controller: &mut PlaybackController<A>,
    state: &mut EventLoopState,
) {
    match key.code {
        KeyCode::Esc => return,
        KeyCode::Enter => {}
        KeyCode::Backspace => {
            prompt.pop();
            state.mode = InputMode::Prompt(prompt);
            return;
        }
        KeyCode::Char(c) => {
            prompt.push(c);
            state.mode = InputMode::Prompt(prompt);
            return;
        }
        _ => {
            state.mode = InputMode::Prompt(prompt);
            return;
        }
    }

    match prompt.submit() {
        Ok(PromptOutcome::Next(next)) => {
            state.notice = None;
            state.mode = InputMode::Prompt(next);
        }
        Ok(PromptOutcome::AddTrack { locator, cover_url }) => {
            state.notice = Some(format!("added {locator}"));
            controller.add_track_by_locator(locator, None, cover_url);
        }
        Ok(PromptOutcome::SetCover(url)) => {
            controller.set_current_cover(url);
        }
        Ok(PromptOutcome::Dismissed) => {}
        Err(e) => {
            state.notice = Some(e.to_string());
            state.mode = InputMode::Prompt(prompt);
        }
    }
}

/// Round to two decimals so repeated steps do not accumulate float noise.
fn round_step(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
