//! `ltriage triage` – full offline pass over a combined run log.

use anyhow::Result;
use ltriage_core::config::LtriageConfig;
use ltriage_core::triage::{self, TriageOptions};
use std::path::Path;

pub fn run_triage(cfg: &LtriageConfig, log: &Path, flush_last: bool) -> Result<()> {
    let options = TriageOptions {
        eof_policy: super::eof_policy(cfg, flush_last),
        filter: cfg.triage.line_filter(),
    };
    let stdout = std::io::stdout();
    let report = triage::run_triage(log, &options, &mut stdout.lock())?;

    println!(
        "{} success, {} missing_images, {} undetermined",
        report.success, report.missing_images, report.undetermined
    );
    if let Some((owner, lines)) = &report.split.unflushed {
        println!("last session ({}, {} lines) not split out", owner, lines);
    }
    for (path, reason) in &report.failed {
        println!("  failed {}: {}", path.display(), reason);
    }
    Ok(())
}
