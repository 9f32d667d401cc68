//! `ltriage fetch` – run the media fetch job over an entity list.

use anyhow::{Context, Result};
use ltriage_core::config::LtriageConfig;
use ltriage_core::fetch::{CurlFetcher, FileRunLog, RetryFetchWorker};
use ltriage_core::job::{self, JsonManifestSource};
use std::path::PathBuf;

#[derive(Debug)]
pub struct FetchArgs {
    pub entities: PathBuf,
    pub work_dir: Option<PathBuf>,
    pub run_log: Option<PathBuf>,
    pub attempts: Option<u32>,
}

pub fn run_fetch(cfg: &LtriageConfig, args: FetchArgs) -> Result<()> {
    let work_dir = match args.work_dir.or_else(|| cfg.work_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let run_log_path = args
        .run_log
        .unwrap_or_else(|| job::default_run_log(&work_dir));
    let budget = args.attempts.unwrap_or(cfg.fetch.attempt_budget);

    let entities = job::read_entity_list(&args.entities)?;
    let run_log = FileRunLog::open(&run_log_path)
        .with_context(|| format!("open run log {}", run_log_path.display()))?;
    let fetcher = CurlFetcher::new(cfg.fetch.curl_options());
    let mut worker = RetryFetchWorker::new(fetcher, run_log, budget);

    tracing::info!(
        entities = entities.len(),
        work_dir = %work_dir.display(),
        run_log = %run_log_path.display(),
        budget,
        "fetch job starting"
    );
    let report = job::run_job(&entities, &work_dir, &JsonManifestSource, &mut worker);

    let t = report.totals;
    println!(
        "{} entities: {} fetched, {} skipped, {} exhausted, {} deferred",
        report.entities, t.fetched, t.skipped, t.exhausted, t.deferred
    );
    for (entity, reason) in &report.failed {
        println!("  failed {}: {}", entity, reason);
    }
    Ok(())
}
