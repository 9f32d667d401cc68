//! Filesystem backend: category directories beside the log.

use super::{RouteBackend, RouteError, TriageState};
use std::fs;
use std::path::{Path, PathBuf};

/// Moves routed logs into `<dir of log>/<category>/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsBackend;

impl RouteBackend for FsBackend {
    fn persist(&mut self, record: &Path, state: TriageState) -> Result<PathBuf, RouteError> {
        match state.category_dir() {
            Some(dir_name) => move_into(record, dir_name),
            None => Ok(record.to_path_buf()),
        }
    }
}

/// Moves `path` into the sibling directory `dir_name`, creating it on first use.
/// Never replaces an existing file in the category.
pub fn move_into(path: &Path, dir_name: &str) -> Result<PathBuf, RouteError> {
    let file_name = match path.file_name() {
        Some(name) if fs::symlink_metadata(path).is_ok() => name,
        _ => return Err(RouteError::SourceMissing(path.to_path_buf())),
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let category = parent.join(dir_name);
    fs::create_dir_all(&category).map_err(|source| RouteError::CreateDir {
        path: category.clone(),
        source,
    })?;

    let dest = category.join(file_name);
    if fs::symlink_metadata(&dest).is_ok() {
        return Err(RouteError::DestinationExists(dest));
    }
    fs::rename(path, &dest).map_err(|source| RouteError::Move {
        from: path.to_path_buf(),
        to: dest.clone(),
        source,
    })?;
    Ok(dest)
}
