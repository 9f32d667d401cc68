//! Routing classified logs into category directories.
//!
//! Routing is a terminal state transition on one log record
//! (`Unclassified -> Success | MissingImages`, or staying unclassified). The
//! transition is decided here; where the record ends up is the business of a
//! [`RouteBackend`]. [`FsBackend`] moves files into sibling directories.

mod fs_backend;

pub use fs_backend::{move_into, FsBackend};

use crate::classify::Verdict;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SUCCESS_DIR: &str = "success";
pub const MISSING_IMAGES_DIR: &str = "missing_images";

/// Lifecycle state of one log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageState {
    Unclassified,
    Success,
    MissingImages,
}

impl TriageState {
    /// Category directory name, or `None` when the record stays where it is.
    pub fn category_dir(self) -> Option<&'static str> {
        match self {
            TriageState::Unclassified => None,
            TriageState::Success => Some(SUCCESS_DIR),
            TriageState::MissingImages => Some(MISSING_IMAGES_DIR),
        }
    }
}

#[derive(Debug, Error)]
pub enum RouteError {
    /// The category already holds a record with this name; nothing was moved.
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),
    /// The record is not (or no longer) at its source path.
    #[error("source no longer exists: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("move {} -> {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Persistence of a state transition.
pub trait RouteBackend {
    /// Records that the log at `record` reached `state`; returns its new location.
    fn persist(&mut self, record: &Path, state: TriageState) -> Result<PathBuf, RouteError>;
}

/// Applies `verdict` to the log at `path`.
///
/// Both predicates were evaluated up front. Success is persisted first; if the
/// verdict also says missing-images, that second transition is still attempted
/// and its error (the record has already moved) is returned.
pub fn route<B: RouteBackend + ?Sized>(
    backend: &mut B,
    path: &Path,
    verdict: Verdict,
) -> Result<TriageState, RouteError> {
    let mut state = TriageState::Unclassified;
    if verdict.success {
        let to = backend.persist(path, TriageState::Success)?;
        tracing::info!(from = %path.display(), to = %to.display(), "routed log");
        state = TriageState::Success;
    }
    if verdict.missing_images {
        let to = backend.persist(path, TriageState::MissingImages)?;
        tracing::info!(from = %path.display(), to = %to.display(), "routed log");
        state = TriageState::MissingImages;
    }
    Ok(state)
}
