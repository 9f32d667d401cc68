//! Bounded-retry artifact fetching.
//!
//! Every attempt is announced on the run log with the number of attempts left
//! (including the current one). That line is what the triage side later
//! filters and classifies, so its format is fixed by [`crate::line`].
//! Retries are immediate; the budget is the only bound.

mod curl_fetcher;
mod error;
mod run_log;
mod task;

pub use curl_fetcher::{CurlFetcher, CurlOptions};
pub use error::FetchError;
pub use run_log::{FileRunLog, MemoryRunLog, RunLog};
pub use task::{destination_for, ArtifactTask};

use crate::line;
use std::io;
use std::path::{Path, PathBuf};

/// Attempts per artifact unless configured otherwise.
pub const DEFAULT_ATTEMPT_BUDGET: u32 = 5;

/// Fetches one artifact URL into a destination file.
pub trait ArtifactFetcher {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

impl<F: ArtifactFetcher + ?Sized> ArtifactFetcher for &mut F {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<(), FetchError> {
        (**self).fetch(url, dest)
    }
}

/// Final outcome of one [`ArtifactTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched,
    /// Destination already present; nothing fetched, nothing logged.
    Skipped,
    /// Every attempt failed.
    Exhausted,
}

pub struct RetryFetchWorker<F, L> {
    fetcher: F,
    run_log: L,
    attempt_budget: u32,
}

impl<F: ArtifactFetcher, L: RunLog> RetryFetchWorker<F, L> {
    pub fn new(fetcher: F, run_log: L, attempt_budget: u32) -> Self {
        Self {
            fetcher,
            run_log,
            attempt_budget,
        }
    }

    pub fn attempt_budget(&self) -> u32 {
        self.attempt_budget
    }

    /// A fresh task carrying this worker's full budget.
    pub fn task(&self, url: impl Into<String>, destination: impl Into<PathBuf>) -> ArtifactTask {
        ArtifactTask::new(url, destination, self.attempt_budget)
    }

    pub fn run_log_mut(&mut self) -> &mut L {
        &mut self.run_log
    }

    pub fn into_parts(self) -> (F, L) {
        (self.fetcher, self.run_log)
    }

    /// Runs `task` to completion.
    ///
    /// Fetch failures only consume budget. The only error is a failure to
    /// record an attempt on the run log.
    pub fn fetch(&mut self, mut task: ArtifactTask) -> io::Result<FetchOutcome> {
        if task.destination.exists() {
            tracing::debug!(url = %task.url, dest = %task.destination.display(), "already fetched");
            return Ok(FetchOutcome::Skipped);
        }

        while task.attempts_remaining > 0 {
            self.run_log
                .record(&line::fetch_attempt_line(&task.url, task.attempts_remaining))?;
            match self.fetcher.fetch(&task.url, &task.destination) {
                Ok(()) => {
                    tracing::debug!(url = %task.url, remaining = task.attempts_remaining, "fetched");
                    return Ok(FetchOutcome::Fetched);
                }
                Err(e) => {
                    tracing::debug!(
                        url = %task.url,
                        remaining = task.attempts_remaining,
                        error = %e,
                        "fetch attempt failed"
                    );
                    task.attempts_remaining -= 1;
                }
            }
        }

        tracing::warn!(url = %task.url, budget = self.attempt_budget, "attempts exhausted");
        Ok(FetchOutcome::Exhausted)
    }
}

#[cfg(test)]
mod tests;
