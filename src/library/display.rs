use std::path::Path;

/// Title shown for a selected file: its file name including the extension,
/// falling back to the full path when there is no final component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| path.display().to_string())
}

/// Label for a picker row: the path relative to the picker root when
/// possible, otherwise the display name.
pub(super) fn relative_label(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => display_name(path),
    }
}
