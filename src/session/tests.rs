use super::*;
use crate::app::{PlaybackController, PlaybackPolicy};
use crate::audio::testing::RecordingAudio;
use crate::error::PlayerError;
use crate::library::FileEntry;
use crate::playlist::Playlist;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

fn sample() -> Snapshot {
    let mut p = Playlist::new();
    p.add_tracks(
        ["01 Intro.m4b", "02 Chapter One.m4b", "03 Chapter Two.m4b"]
            .iter()
            .map(|n| FileEntry::from_path(PathBuf::from("/books/Dune").join(n)))
            .collect(),
    );
    let mut tracks = p.tracks().to_vec();
    tracks[1].cover_url = Some("https://example.com/dune.jpg".into());
    Snapshot {
        tracks,
        current: Some(1),
        cover_url: "https://example.com/dune.jpg".into(),
        rate: 1.35,
        pos: 1234.5,
        volume: 0.8,
    }
}

fn store_in(dir: &tempfile::TempDir) -> SnapshotStore {
    SnapshotStore::new(dir.path().join("state").join("session.json"))
}

#[test]
fn save_then_load_reproduces_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let snap = sample();

    store.save_snapshot(&snap).unwrap();
    assert_eq!(store.try_load().unwrap(), Some(snap.clone()));
    assert_eq!(store.load_snapshot(), snap);
}

#[test]
fn empty_session_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save_snapshot(&Snapshot::default()).unwrap();
    assert_eq!(store.load_snapshot(), Snapshot::default());
}

#[test]
fn saving_overwrites_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save_snapshot(&sample()).unwrap();
    store.save_snapshot(&Snapshot::default()).unwrap();

    assert_eq!(store.load_snapshot(), Snapshot::default());
    let names: Vec<_> = fs::read_dir(dir.path().join("state"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["session.json"]);
}

#[test]
fn missing_slot_loads_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(store.try_load().unwrap().is_none());
    assert_eq!(store.load_snapshot(), Snapshot::default());
}

#[test]
fn malformed_payload_degrades_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();

    for junk in ["", "not json", "{\"tracks\": 7}", "[1, 2, 3]"] {
        fs::write(store.path(), junk).unwrap();
        assert!(
            matches!(store.try_load(), Err(PlayerError::PersistenceCorrupt(_))),
            "{junk:?} should be reported as corrupt"
        );
        assert_eq!(store.load_snapshot(), Snapshot::default());
    }
}

#[test]
fn wire_format_uses_the_documented_field_names() {
    let json = sample().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for key in ["tracks", "current", "coverUrl", "rate", "pos", "volume"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    let track = &value["tracks"][1];
    assert_eq!(track["title"], "02 Chapter One.m4b");
    assert_eq!(
        track["sourceLocator"],
        "file:///books/Dune/02%20Chapter%20One.m4b"
    );
    assert_eq!(track["coverUrl"], "https://example.com/dune.jpg");
}

#[test]
fn older_snapshots_without_volume_default_to_full() {
    let snap = Snapshot::from_json(
        r#"{"tracks": [], "current": null, "coverUrl": "", "rate": 1.5, "pos": 0}"#,
    )
    .unwrap();
    assert_eq!(snap.volume, 1.0);
    assert_eq!(snap.rate, 1.5);
}

#[test]
fn schema_violations_are_rejected() {
    let mut cases = Vec::new();

    let mut s = sample();
    s.current = Some(3);
    cases.push(("cursor out of range", s));

    let mut s = sample();
    s.current = None;
    cases.push(("missing cursor", s));

    cases.push((
        "cursor on empty playlist",
        Snapshot {
            current: Some(0),
            ..Snapshot::default()
        },
    ));

    let mut s = sample();
    s.rate = 0.0;
    cases.push(("zero rate", s));

    let mut s = sample();
    s.pos = -1.0;
    cases.push(("negative position", s));

    let mut s = sample();
    s.volume = 1.5;
    cases.push(("loud volume", s));

    let mut s = sample();
    let dup = s.tracks[0].clone();
    s.tracks.push(dup);
    cases.push(("duplicate ids", s));

    for (name, snap) in cases {
        assert!(
            matches!(snap.validate(), Err(PlayerError::PersistenceCorrupt(_))),
            "{name}"
        );
        let json = serde_json::to_string(&snap).unwrap();
        assert!(Snapshot::from_json(&json).is_err(), "{name}");
    }
}

#[test]
fn autosave_writes_structural_changes_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let mut autosave = Autosave::new(store.clone(), Duration::from_secs(3600));
    let mut c = PlaybackController::new(RecordingAudio::default(), PlaybackPolicy::default(), 1.0);

    assert!(autosave.tick(&c), "first tick writes the initial state");
    assert!(!autosave.tick(&c));

    c.add_tracks(vec![FileEntry::from_path(PathBuf::from("/books/a.mp3"))]);
    assert!(autosave.tick(&c));
    assert_eq!(store.load_snapshot().tracks.len(), 1);
}

#[test]
fn autosave_coalesces_position_updates() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let mut autosave = Autosave::new(store.clone(), Duration::from_secs(3600));
    let mut c = PlaybackController::new(RecordingAudio::default(), PlaybackPolicy::default(), 1.0);
    c.add_tracks(vec![FileEntry::from_path(PathBuf::from("/books/a.mp3"))]);
    assert!(autosave.tick(&c));

    c.on_time_update(10.0);
    assert!(!autosave.tick(&c), "position alone waits for the interval");
    assert_eq!(store.load_snapshot().pos, 0.0);

    autosave.flush(&c).unwrap();
    assert_eq!(store.load_snapshot().pos, 10.0);
}

#[test]
fn autosave_writes_position_once_the_interval_passed() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let mut autosave = Autosave::new(store.clone(), Duration::ZERO);
    let mut c = PlaybackController::new(RecordingAudio::default(), PlaybackPolicy::default(), 1.0);
    c.add_tracks(vec![FileEntry::from_path(PathBuf::from("/books/a.mp3"))]);
    autosave.tick(&c);

    c.on_time_update(7.0);
    assert!(autosave.tick(&c));
    assert_eq!(store.load_snapshot().pos, 7.0);
}
