//! Artifact tasks and where they land on disk.

use std::path::{Path, PathBuf};

/// One media reference to fetch for an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactTask {
    pub url: String,
    pub destination: PathBuf,
    pub attempts_remaining: u32,
}

impl ArtifactTask {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>, attempts: u32) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            attempts_remaining: attempts,
        }
    }
}

/// `<entity_dir>/<last path segment of url>`.
///
/// Returns `None` when the URL does not parse or has no usable final segment.
/// The query string is not part of the name.
pub fn destination_for(entity_dir: &Path, url: &str) -> Option<PathBuf> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(entity_dir.join(segment))
}
