use std::path::Path;

use log::warn;
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::FileEntry;

/// Normalized extension filter: lowercase, without leading dots.
fn wanted_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| exts.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

/// List the audio files under `dir` that the file selector offers.
///
/// Entries carry absolute paths even when `dir` is relative. They come
/// back sorted by path, case-insensitively, so files inside one folder
/// stay together in chapter order.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<FileEntry> {
    let exts = wanted_extensions(settings);
    let root = match std::path::absolute(dir) {
        Ok(root) => root,
        Err(e) => {
            warn!("cannot resolve {}: {e}", dir.display());
            return Vec::new();
        }
    };
    let mut walker = WalkDir::new(&root).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    // The root itself may be hidden; only skip hidden entries below it.
    let mut entries: Vec<FileEntry> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_extension(e.path(), &exts))
        .map(|e| FileEntry::from_path(e.into_path()))
        .collect();

    entries.sort_by_cached_key(|e| e.path.to_string_lossy().to_lowercase());
    entries
}
