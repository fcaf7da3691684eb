use super::types::FileHandle;
use ignore::Walk;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Extensions offered by the file picker. Advisory: nothing downstream enforces them.
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["png", "tif", "tiff", "jpg", "jpeg"];

pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Accepted images under `folder`, skipping anything .gitignore'd. Sorted by path.
pub fn collect_from_folder(folder: &Path) -> Vec<FileHandle> {
    let mut paths: Vec<PathBuf> = Walk::new(folder)
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", folder.display(), e);
                None
            }
        })
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_accepted(path))
        .collect();
    paths.sort();

    debug!("found {} image(s) in {}", paths.len(), folder.display());
    paths.into_iter().map(FileHandle::from_path).collect()
}

/// A file dropped on the window. Prefers the on-disk path, falls back to bytes.
pub fn from_dropped(
    name: &str,
    path: Option<PathBuf>,
    bytes: Option<Arc<[u8]>>,
) -> Option<FileHandle> {
    match (path, bytes) {
        (Some(path), _) if path.is_file() => Some(FileHandle::from_path(path)),
        (_, Some(bytes)) => Some(FileHandle::in_memory(name, bytes)),
        _ => {
            warn!("ignoring dropped item '{}' with no readable content", name);
            None
        }
    }
}
