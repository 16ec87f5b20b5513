use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::PlaybackController;
use crate::audio::{AudioEvent, AudioPlayer};
use crate::logging;

mod event_loop;
mod prompt;
mod settings;
mod startup;

pub use event_loop::{EventLoopState, InputMode};
pub use prompt::Prompt;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let arg = env::args().nth(1);
    if arg.as_deref() == Some("--print-config") {
        print!("{}", settings::render_settings(&settings)?);
        return Ok(());
    }

    logging::init(&settings.logging, settings.log_path());

    let start_dir = startup::start_dir(arg);
    let policy = startup::playback_policy(&settings);
    let (mut autosave, snapshot) = startup::restore_session(&settings);

    let (event_tx, event_rx) = mpsc::channel::<AudioEvent>();
    let audio_player = AudioPlayer::new(settings.audio.clone(), event_tx);
    let mut controller = PlaybackController::restore(snapshot, audio_player, policy);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = EventLoopState::new(&controller, start_dir);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut controller,
            &event_rx,
            &mut autosave,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = autosave.flush(&controller) {
        warn!("final session save failed: {e}");
    }
    controller
        .audio()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    info!("shut down");

    run_result
}
