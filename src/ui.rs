//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{EndOfPlaylist, PlaybackController, PlaybackState, SessionState};
use crate::audio::AudioElement;
use crate::config::{PlaybackSettings, UiSettings};
use crate::library::FilePicker;
use crate::runtime::{EventLoopState, InputMode, Prompt};

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] scrub -/+{scrub_seconds}s"),
        "[0-9] jump".to_string(),
        "[ [/] ] rate".to_string(),
        "[-/+] volume".to_string(),
        "[o] open files".to_string(),
        "[u] add URL".to_string(),
        "[c] set cover".to_string(),
        "[d] remove".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format seconds as `MM:SS`.
fn format_mmss(seconds: f64) -> String {
    let secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `elapsed / total`, or just the elapsed time while the duration is unknown.
fn time_text(session: &SessionState, separator: &str) -> String {
    match session.duration {
        Some(d) => format!(
            "{}{}{}",
            format_mmss(session.last_position),
            separator,
            format_mmss(d)
        ),
        None => format_mmss(session.last_position),
    }
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "Idle",
        PlaybackState::Paused => "Paused",
        PlaybackState::Playing => "Playing",
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// First row of a window of `height` rows that keeps `selected` centered.
fn window_start(selected: usize, total: usize, height: usize) -> usize {
    if total <= height || height == 0 {
        return 0;
    }
    let half = height / 2;
    selected.saturating_sub(half).min(total - height)
}

/// Render the entire UI into the provided `frame`.
pub fn draw<A: AudioElement>(
    frame: &mut Frame,
    controller: &PlaybackController<A>,
    state: &EventLoopState,
    ui_settings: &UiSettings,
    playback_settings: &PlaybackSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" audioglass ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_now_playing(frame, chunks[1], controller, ui_settings);
    draw_playlist(frame, chunks[2], controller, state.cursor);

    if let Some(notice) = &state.notice {
        frame.render_widget(Paragraph::new(format!(" {notice}")).bold(), chunks[3]);
    }

    let footer = Paragraph::new(controls_text(playback_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    match &state.mode {
        InputMode::Normal => {}
        InputMode::Picker(picker) => draw_picker(frame, chunks[2], picker),
        InputMode::Prompt(prompt) => draw_prompt(frame, chunks[2], prompt),
    }
}

fn draw_now_playing<A: AudioElement>(
    frame: &mut Frame,
    area: Rect,
    controller: &PlaybackController<A>,
    ui_settings: &UiSettings,
) {
    let block = Block::bordered().padding(LEFT_PAD).title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let session = controller.session();
    let track = controller.current_track();

    let title = track.map_or("No track loaded", |t| t.title.as_str());
    frame.render_widget(Paragraph::new(title).bold(), rows[0]);

    let cover = track
        .and_then(|t| t.cover_url.as_deref())
        .map_or("Cover: No cover".to_string(), |url| format!("Cover: {url}"));
    frame.render_widget(Paragraph::new(cover), rows[1]);

    let at_end = match controller.policy().end_of_playlist {
        EndOfPlaylist::Wrap => "wrap",
        EndOfPlaylist::Stop => "stop",
    };
    let status = format!(
        "{} • rate {:.2}x • volume {:.0}% • at end: {at_end}",
        state_label(controller.state()),
        session.playback_rate,
        session.volume * 100.0
    );
    frame.render_widget(Paragraph::new(status), rows[2]);

    if track.is_some() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().add_modifier(Modifier::REVERSED))
            .ratio(session.progress().unwrap_or(0.0))
            .label(time_text(session, &ui_settings.time_separator));
        frame.render_widget(gauge, rows[3]);
    }
}

fn draw_playlist<A: AudioElement>(
    frame: &mut Frame,
    area: Rect,
    controller: &PlaybackController<A>,
    cursor: usize,
) {
    let playlist = controller.playlist();
    let total = playlist.len();
    let height = area.height.saturating_sub(2) as usize;
    let start = window_start(cursor, total, height);
    let end = (start + height.max(1)).min(total);

    // Only build items for the visible window.
    let items: Vec<ListItem> = playlist.tracks()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let marker = if playlist.current() == Some(start + offset) {
                "♪ "
            } else {
                "  "
            };
            ListItem::new(format!("{marker}{}", track.title))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" playlist ({total}) ")),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if total > 0 {
        list_state.select(Some(cursor.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_picker(frame: &mut Frame, area: Rect, picker: &FilePicker) {
    let popup = centered_rect_sized(80, 20, area);
    frame.render_widget(Clear, popup);

    let total = picker.entries().len();
    let height = popup.height.saturating_sub(2) as usize;
    let start = window_start(picker.cursor(), total, height);
    let end = (start + height.max(1)).min(total);

    let items: Vec<ListItem> = (start..end)
        .map(|i| {
            let mark = if picker.is_marked(i) { "[x] " } else { "[ ] " };
            ListItem::new(format!("{mark}{}", picker.label(i)))
        })
        .collect();

    let title = format!(
        " {} • {} marked • space mark, a all, enter add, esc cancel ",
        picker.root().display(),
        picker.marked_count()
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default();
    if total > 0 {
        list_state.select(Some(picker.cursor() - start));
    }
    frame.render_stateful_widget(list, popup, &mut list_state);
}

fn draw_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt) {
    let popup = centered_rect_sized(72, 3, area);
    frame.render_widget(Clear, popup);

    let input = Paragraph::new(Line::from(format!("{}█", prompt.input()))).block(
        Block::default()
            .borders(Borders::ALL)
            .title(prompt.title())
            .title_bottom(" enter confirm • esc cancel ")
            .padding(LEFT_PAD),
    );
    frame.render_widget(input, popup);
}
