use super::*;
use crate::error::PlayerError;
use std::path::{Path, PathBuf};

fn entries(names: &[&str]) -> Vec<FileEntry> {
    names
        .iter()
        .map(|n| FileEntry::from_path(PathBuf::from("/books").join(n)))
        .collect()
}

#[test]
fn display_name_keeps_extension() {
    assert_eq!(display_name(Path::new("/x/song.mp3")), "song.mp3");
    assert_eq!(display_name(Path::new("/")), "/");
}

#[test]
fn local_paths_resolve_to_file_urls() {
    let loc = Locator::from_path(Path::new("/x/song.mp3")).unwrap();
    assert_eq!(loc.as_str(), "file:///x/song.mp3");
    assert_eq!(loc.to_file_path(), Some(PathBuf::from("/x/song.mp3")));
    assert_eq!(loc.title_hint(), "song.mp3");
}

#[test]
fn relative_paths_are_rejected() {
    let err = Locator::from_path(Path::new("x/song.mp3")).unwrap_err();
    assert!(matches!(err, PlayerError::InvalidLocator { .. }));
}

#[test]
fn parse_accepts_http_and_file_urls_and_absolute_paths() {
    let web = Locator::parse("  https://example.com/books/ch1.mp3 ").unwrap();
    assert_eq!(web.as_str(), "https://example.com/books/ch1.mp3");
    assert_eq!(web.to_file_path(), None);
    assert_eq!(web.title_hint(), "ch1.mp3");

    let file = Locator::parse("file:///tmp/a%20b.mp3").unwrap();
    assert_eq!(file.title_hint(), "a b.mp3");

    let path = Locator::parse("/tmp/c.ogg").unwrap();
    assert_eq!(path.as_str(), "file:///tmp/c.ogg");
}

#[test]
fn parse_rejects_empty_malformed_and_foreign_schemes() {
    for bad in ["", "   ", "not a url", "ftp://example.com/a.mp3", "relative/a.mp3", "http://"] {
        let err = Locator::parse(bad).unwrap_err();
        assert!(
            matches!(err, PlayerError::InvalidLocator { .. }),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn title_hint_falls_back_to_host_for_bare_urls() {
    let loc = Locator::parse("http://radio.example.com/").unwrap();
    assert_eq!(loc.title_hint(), "radio.example.com");
}

#[test]
fn locator_serializes_as_plain_string() {
    let loc = Locator::parse("https://example.com/a.mp3").unwrap();
    let json = serde_json::to_string(&loc).unwrap();
    assert_eq!(json, "\"https://example.com/a.mp3\"");
    let back: Locator = serde_json::from_str(&json).unwrap();
    assert_eq!(back, loc);
    assert!(serde_json::from_str::<Locator>("\"nope\"").is_err());
}

#[test]
fn cover_urls_are_validated() {
    assert_eq!(
        validate_cover_url("http://x/cover.jpg").unwrap(),
        "http://x/cover.jpg"
    );
    assert!(validate_cover_url("").is_err());
}

#[test]
fn picker_confirm_without_marks_returns_highlighted_entry() {
    let mut picker = FilePicker::with_entries(PathBuf::from("/books"), entries(&["a.mp3", "b.mp3"]));
    picker.next();
    let chosen = picker.confirm().unwrap();
    assert_eq!(chosen.len(), 1);
    assert_eq!(chosen[0].display_name, "b.mp3");
}

#[test]
fn picker_confirm_returns_marked_entries_in_list_order() {
    let mut picker = FilePicker::with_entries(
        PathBuf::from("/books"),
        entries(&["a.mp3", "b.mp3", "c.mp3"]),
    );
    picker.prev(); // wraps to c
    picker.toggle_mark();
    picker.next(); // wraps to a
    picker.toggle_mark();
    assert_eq!(picker.marked_count(), 2);

    let names: Vec<String> = picker
        .confirm()
        .unwrap()
        .into_iter()
        .map(|e| e.display_name)
        .collect();
    assert_eq!(names, vec!["a.mp3", "c.mp3"]);
}

#[test]
fn picker_toggle_all_marks_then_clears() {
    let mut picker = FilePicker::with_entries(PathBuf::from("/books"), entries(&["a.mp3", "b.mp3"]));
    picker.toggle_all();
    assert_eq!(picker.marked_count(), 2);
    picker.toggle_all();
    assert_eq!(picker.marked_count(), 0);
}

#[test]
fn picker_cancel_and_empty_listing_are_cancellations() {
    let picker = FilePicker::with_entries(PathBuf::from("/books"), entries(&["a.mp3"]));
    assert!(matches!(picker.cancel(), Err(PlayerError::SelectionCancelled)));

    let empty = FilePicker::with_entries(PathBuf::from("/books"), Vec::new());
    assert!(matches!(empty.confirm(), Err(PlayerError::SelectionCancelled)));
}

#[test]
fn picker_labels_are_relative_to_root() {
    let picker = FilePicker::with_entries(
        PathBuf::from("/books"),
        vec![FileEntry::from_path(PathBuf::from("/books/Dune/01.mp3"))],
    );
    assert_eq!(picker.label(0), Path::new("Dune").join("01.mp3").display().to_string());
    assert_eq!(picker.label(5), "");
}
