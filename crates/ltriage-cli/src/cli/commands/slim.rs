//! `ltriage slim` – drop noise lines in place.

use anyhow::Result;
use ltriage_core::config::LtriageConfig;
use std::path::Path;

pub fn run_slim(cfg: &LtriageConfig, path: &Path) -> Result<()> {
    let dropped = cfg.triage.line_filter().filter_file(path)?;
    println!("{}: dropped {} line(s)", path.display(), dropped);
    Ok(())
}
