//! Modal file selector.
//!
//! The picker lists the audio files under a root directory and lets the
//! user mark any number of them. Confirming returns the chosen entries in
//! list order; cancelling yields `PlayerError::SelectionCancelled`, which
//! callers treat as an empty selection.

use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;
use crate::error::PlayerError;

use super::display::relative_label;
use super::model::FileEntry;
use super::scan::scan;

pub struct FilePicker {
    root: PathBuf,
    entries: Vec<FileEntry>,
    marked: Vec<bool>,
    cursor: usize,
}

impl FilePicker {
    /// Scan `root` with the configured extension filter and open a picker
    /// over the result.
    pub fn open(root: &Path, settings: &LibrarySettings) -> Self {
        Self::with_entries(root.to_path_buf(), scan(root, settings))
    }

    pub fn with_entries(root: PathBuf, entries: Vec<FileEntry>) -> Self {
        let marked = vec![false; entries.len()];
        Self {
            root,
            entries,
            marked,
            cursor: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.get(index).copied().unwrap_or(false)
    }

    pub fn marked_count(&self) -> usize {
        self.marked.iter().filter(|m| **m).count()
    }

    pub fn label(&self, index: usize) -> String {
        self.entries
            .get(index)
            .map(|e| relative_label(&self.root, &e.path))
            .unwrap_or_default()
    }

    /// Move the highlight down, wrapping to the first entry.
    pub fn next(&mut self) {
        if !self.entries.is_empty() {
            self.cursor = (self.cursor + 1) % self.entries.len();
        }
    }

    /// Move the highlight up, wrapping to the last entry.
    pub fn prev(&mut self) {
        if !self.entries.is_empty() {
            self.cursor = self
                .cursor
                .checked_sub(1)
                .unwrap_or(self.entries.len() - 1);
        }
    }

    pub fn toggle_mark(&mut self) {
        if let Some(m) = self.marked.get_mut(self.cursor) {
            *m = !*m;
        }
    }

    /// Mark every entry, or clear all marks when everything is already marked.
    pub fn toggle_all(&mut self) {
        let all = !self.marked.is_empty() && self.marked.iter().all(|m| *m);
        self.marked.iter_mut().for_each(|m| *m = !all);
    }

    /// Finish the selection. With nothing marked, the highlighted entry is
    /// the selection. An empty listing counts as a cancel.
    pub fn confirm(self) -> Result<Vec<FileEntry>, PlayerError> {
        if self.entries.is_empty() {
            return Err(PlayerError::SelectionCancelled);
        }

        if !self.marked.iter().any(|m| *m) {
            let cursor = self.cursor;
            return Ok(self.entries.into_iter().skip(cursor).take(1).collect());
        }

        Ok(self
            .entries
            .into_iter()
            .zip(self.marked)
            .filter_map(|(e, m)| m.then_some(e))
            .collect())
    }

    pub fn cancel(self) -> Result<Vec<FileEntry>, PlayerError> {
        Err(PlayerError::SelectionCancelled)
    }
}
