//! Offline triage pass over a finished run log.
//!
//! Split the combined log into per-owner files, then slim, classify and
//! route each segment the split wrote. Must not run while a fetch job is
//! still appending to the combined log.

use crate::classify::Verdict;
use crate::filter::LineFilter;
use crate::line;
use crate::router::{self, FsBackend, TriageState};
use crate::segment::{self, EofPolicy, SplitSummary};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct TriageOptions {
    pub eof_policy: EofPolicy,
    pub filter: LineFilter,
}

#[derive(Debug, Clone, Default)]
pub struct TriageReport {
    pub split: SplitSummary,
    pub success: usize,
    pub missing_images: usize,
    pub undetermined: usize,
    /// Files that could not be triaged, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Slims, classifies and routes one single-session log.
pub fn triage_file(path: &Path, filter: &LineFilter) -> Result<TriageState> {
    filter.filter_file(path)?;
    let lines = line::read_lines(path).with_context(|| format!("read {}", path.display()))?;
    let verdict = Verdict::of(&lines);
    tracing::debug!(
        path = %path.display(),
        success = verdict.success,
        missing_images = verdict.missing_images,
        "classified"
    );
    let state = router::route(&mut FsBackend, path, verdict)
        .with_context(|| format!("route {}", path.display()))?;
    Ok(state)
}

/// Runs the whole pass for the combined log at `log_path`.
///
/// Only the segments this pass wrote are slimmed, classified and routed;
/// anything else beside the log is left alone. Orphaned preamble lines are
/// echoed to `console`. An unreadable combined log aborts the pass; a failing
/// segment is recorded and skipped.
pub fn run_triage<W: Write>(
    log_path: &Path,
    options: &TriageOptions,
    console: &mut W,
) -> Result<TriageReport> {
    let split = segment::split_log(log_path, options.eof_policy, console)?;
    let dir = match log_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    // An owner seen twice was written twice; its file holds the later session.
    let mut segments: Vec<PathBuf> = Vec::new();
    for owner in &split.written {
        let path = dir.join(owner);
        if !segments.contains(&path) {
            segments.push(path);
        }
    }
    let mut report = TriageReport {
        split,
        ..TriageReport::default()
    };

    for path in segments {
        match triage_file(&path, &options.filter) {
            Ok(TriageState::Success) => report.success += 1,
            Ok(TriageState::MissingImages) => report.missing_images += 1,
            Ok(TriageState::Unclassified) => report.undetermined += 1,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %format!("{:#}", e), "triage failed");
                report.failed.push((path, format!("{:#}", e)));
            }
        }
    }

    tracing::info!(
        success = report.success,
        missing_images = report.missing_images,
        undetermined = report.undetermined,
        failed = report.failed.len(),
        "triage pass done"
    );
    Ok(report)
}
