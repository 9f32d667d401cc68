//! `ltriage classify` – print the outcome category of one session log.

use anyhow::{Context, Result};
use ltriage_core::{classify, line};
use std::path::Path;

pub fn run_classify(path: &Path) -> Result<()> {
    let lines = line::read_lines(path).with_context(|| format!("read {}", path.display()))?;
    println!("{}", classify::classify(&lines));
    Ok(())
}
