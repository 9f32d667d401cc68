//! `ltriage split` – split a combined run log per entity.

use anyhow::Result;
use ltriage_core::config::LtriageConfig;
use ltriage_core::segment;
use std::path::Path;

pub fn run_split(cfg: &LtriageConfig, log: &Path, flush_last: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let summary = segment::split_log(log, super::eof_policy(cfg, flush_last), &mut stdout.lock())?;
    tracing::info!(
        written = summary.written.len(),
        orphans = summary.orphan_lines,
        failed = summary.failed_flushes.len(),
        "split done"
    );
    if let Some((owner, lines)) = &summary.unflushed {
        eprintln!(
            "last session ({}, {} lines) not written; use --flush-last to write it",
            owner, lines
        );
    }
    for owner in &summary.failed_flushes {
        eprintln!("could not write segment for {}", owner);
    }
    Ok(())
}
