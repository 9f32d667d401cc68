//! Splitting a combined run log into one file per entity session.
//!
//! A session opens at each session-start marker and is sealed by the next
//! marker. Lines seen before the first marker belong to nobody and are echoed
//! to the console instead of being written. What happens to the last session
//! at end of file is an explicit [`EofPolicy`].

use crate::line::{self, LineKind};
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Treatment of the session still open when the input ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// Leave the last session unwritten; only a following marker seals it.
    #[default]
    Preserve,
    /// Seal and write the last session like any other.
    Flush,
}

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("echo orphaned line: {0}")]
    Echo(#[source] io::Error),
}

/// What a split pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// Owners whose segment file was written, in order of sealing.
    pub written: Vec<String>,
    /// Lines echoed because no owner could be attributed.
    pub orphan_lines: usize,
    /// Owners whose segment could not be written.
    pub failed_flushes: Vec<String>,
    /// Owner and line count of the session left open under `EofPolicy::Preserve`.
    pub unflushed: Option<(String, usize)>,
}

/// Splits the log at `path` into `<dir of path>/<owner>` files.
///
/// Orphaned lines go to `console`, one per line. An unreadable input is an
/// error; a segment that cannot be written is logged, recorded in the summary
/// and skipped.
pub fn split_log<W: Write>(
    path: &Path,
    policy: EofPolicy,
    console: &mut W,
) -> Result<SplitSummary, SplitError> {
    let lines = line::read_lines(path).map_err(|source| SplitError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let out_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut splitter = Splitter {
        input: path,
        out_dir,
        console,
        summary: SplitSummary::default(),
    };
    let mut owner: Option<String> = None;
    let mut buffer: Vec<String> = Vec::new();

    for l in lines {
        if let LineKind::SessionStart { owner: next } = LineKind::lex(&l) {
            let next = line::is_valid_owner(next).then(|| next.to_string());
            if next.is_none() {
                tracing::warn!(marker = l.trim_end(), "session marker without usable owner");
            }
            splitter.seal(owner.take(), std::mem::take(&mut buffer))?;
            owner = next;
        }
        buffer.push(l);
    }

    match (policy, owner) {
        (EofPolicy::Flush, owner) => splitter.seal(owner, buffer)?,
        (EofPolicy::Preserve, Some(owner)) => {
            tracing::warn!(
                owner = %owner,
                lines = buffer.len(),
                "last session left unwritten at end of log"
            );
            splitter.summary.unflushed = Some((owner, buffer.len()));
        }
        (EofPolicy::Preserve, None) => {}
    }

    Ok(splitter.summary)
}

struct Splitter<'a, W> {
    input: &'a Path,
    out_dir: PathBuf,
    console: &'a mut W,
    summary: SplitSummary,
}

impl<W: Write> Splitter<'_, W> {
    fn seal(&mut self, owner: Option<String>, lines: Vec<String>) -> Result<(), SplitError> {
        let Some(owner) = owner else {
            for l in &lines {
                writeln!(self.console, "{}", l.trim_end_matches(['\r', '\n']))
                    .map_err(SplitError::Echo)?;
            }
            self.summary.orphan_lines += lines.len();
            return Ok(());
        };

        // Segments land beside the input, so a matching name is the input itself.
        let target = self.out_dir.join(&owner);
        let result = if self.input.file_name() == Some(OsStr::new(&owner)) {
            Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "segment would overwrite the combined log",
            ))
        } else {
            fs::write(&target, lines.concat())
        };
        match result {
            Ok(()) => {
                tracing::debug!(owner = %owner, lines = lines.len(), "wrote segment");
                self.summary.written.push(owner);
            }
            Err(e) => {
                tracing::warn!(owner = %owner, path = %target.display(), error = %e, "could not write segment");
                self.summary.failed_flushes.push(owner);
            }
        }
        Ok(())
    }
}
