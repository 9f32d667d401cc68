//! Noise removal for run logs ("slimming").
//!
//! Drops blank lines, all but the last fetch attempt of each artifact, proxy
//! selection, deprecation chatter and scrape-start announcements. Every other
//! line is kept byte for byte, terminator included.

use crate::line::{self, LineKind, SOFT_FAILURE_COUNTER};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Default attempt budget of the fetch worker; counters above the soft-failure
/// value are noise.
const DEFAULT_NOISY_COUNTERS: [u32; 4] = [2, 3, 4, 5];

/// Stateless, order-preserving line filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFilter {
    noisy_counters: Vec<u32>,
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::new(DEFAULT_NOISY_COUNTERS)
    }
}

impl LineFilter {
    /// Filter dropping fetch attempts whose retry counter is in `noisy_counters`.
    pub fn new(noisy_counters: impl IntoIterator<Item = u32>) -> Self {
        let mut noisy_counters: Vec<u32> = noisy_counters.into_iter().collect();
        noisy_counters.sort_unstable();
        noisy_counters.dedup();
        Self { noisy_counters }
    }

    /// Noisy set for a worker with `budget` attempts: everything above the
    /// soft-failure counter.
    pub fn for_attempt_budget(budget: u32) -> Self {
        Self::new(SOFT_FAILURE_COUNTER + 1..=budget)
    }

    pub fn noisy_counters(&self) -> &[u32] {
        &self.noisy_counters
    }

    /// True if `line` survives filtering.
    pub fn keeps(&self, line: &str) -> bool {
        match LineKind::lex(line) {
            LineKind::SessionStart { .. } => true,
            _ if line::is_deprecation_noise(line) => false,
            LineKind::Blank
            | LineKind::ProxySelection
            | LineKind::Deprecation
            | LineKind::ScrapeStart => false,
            LineKind::FetchAttempt {
                remaining: Some(n), ..
            } => self.noisy_counters.binary_search(&n).is_err(),
            _ => true,
        }
    }

    pub fn filter<I, S>(&self, lines: I) -> Vec<S>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter(|l| self.keeps(l.as_ref()))
            .collect()
    }

    /// Rewrites `path` in place with only the retained lines.
    /// Returns the number of dropped lines; the file is untouched when zero.
    pub fn filter_file(&self, path: &Path) -> Result<usize> {
        let lines = line::read_lines(path).with_context(|| format!("read {}", path.display()))?;
        let total = lines.len();
        let kept = self.filter(lines);
        let dropped = total - kept.len();
        if dropped > 0 {
            fs::write(path, kept.concat()).with_context(|| format!("write {}", path.display()))?;
            tracing::debug!(path = %path.display(), dropped, "slimmed log");
        }
        Ok(dropped)
    }
}
