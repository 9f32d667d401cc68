//! The fetch job: one session per entity.
//!
//! For each entity the session-start marker goes to the run log first, then
//! its images are fetched through the retry worker and its primary media is
//! appended to `videos.txt` in the entity directory.

mod source;

pub use source::{EntityMedia, JsonManifestSource, MediaSource, MANIFEST_FILE};

use crate::fetch::{destination_for, ArtifactFetcher, FetchOutcome, RetryFetchWorker, RunLog};
use crate::line;
use anyhow::{bail, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Deferred primary-media list in each entity directory.
pub const DEFERRED_FILE: &str = "videos.txt";

/// Directory under the work dir holding the run log and, after a split, its
/// segments. Kept apart from the entity directories, which share owner names.
pub const RUN_LOG_DIR: &str = "logs";
pub const RUN_LOG_FILE: &str = "log.txt";

/// `<work_dir>/logs/log.txt`.
pub fn default_run_log(work_dir: &Path) -> PathBuf {
    work_dir.join(RUN_LOG_DIR).join(RUN_LOG_FILE)
}

/// Reads an entity list: one per line, optional leading `@`, blanks skipped.
pub fn read_entity_list(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(parse_entity_list(&data))
}

pub fn parse_entity_list(data: &str) -> Vec<String> {
    data.lines()
        .map(|l| {
            let l = l.trim();
            l.strip_prefix('@').unwrap_or(l).trim().to_string()
        })
        .filter(|l| !l.is_empty())
        .collect()
}

/// Per-entity counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityReport {
    pub fetched: usize,
    pub skipped: usize,
    pub exhausted: usize,
    /// Image URLs with no usable file name.
    pub unnamed: usize,
    pub deferred: usize,
}

impl EntityReport {
    fn absorb(&mut self, other: EntityReport) {
        self.fetched += other.fetched;
        self.skipped += other.skipped;
        self.exhausted += other.exhausted;
        self.unnamed += other.unnamed;
        self.deferred += other.deferred;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    pub entities: usize,
    /// Entities that could not be processed, with the reason.
    pub failed: Vec<(String, String)>,
    pub totals: EntityReport,
}

/// Runs one entity session under `work_dir`.
pub fn run_entity<S, F, L>(
    entity: &str,
    work_dir: &Path,
    source: &S,
    worker: &mut RetryFetchWorker<F, L>,
) -> Result<EntityReport>
where
    S: MediaSource + ?Sized,
    F: ArtifactFetcher,
    L: RunLog,
{
    if !line::is_valid_owner(entity) {
        bail!("invalid entity name {:?}", entity);
    }
    let entity_dir = work_dir.join(entity);
    fs::create_dir_all(&entity_dir)
        .with_context(|| format!("create {}", entity_dir.display()))?;

    worker
        .run_log_mut()
        .record(&line::session_start_line(entity))
        .context("write session marker")?;

    let media = source.media_for(entity, &entity_dir)?;
    let mut report = EntityReport::default();

    for url in &media.images {
        let Some(dest) = destination_for(&entity_dir, url) else {
            tracing::warn!(entity, url = %url, "image URL has no file name; skipped");
            report.unnamed += 1;
            continue;
        };
        let task = worker.task(url.as_str(), dest);
        match worker.fetch(task)? {
            FetchOutcome::Fetched => report.fetched += 1,
            FetchOutcome::Skipped => report.skipped += 1,
            FetchOutcome::Exhausted => report.exhausted += 1,
        }
    }

    append_deferred(&entity_dir.join(DEFERRED_FILE), &media.primary)?;
    report.deferred = media.primary.len();

    tracing::info!(
        entity,
        fetched = report.fetched,
        skipped = report.skipped,
        exhausted = report.exhausted,
        deferred = report.deferred,
        "entity done"
    );
    Ok(report)
}

/// Runs every entity in order. One entity failing does not stop the others.
pub fn run_job<S, F, L>(
    entities: &[String],
    work_dir: &Path,
    source: &S,
    worker: &mut RetryFetchWorker<F, L>,
) -> JobReport
where
    S: MediaSource + ?Sized,
    F: ArtifactFetcher,
    L: RunLog,
{
    let mut report = JobReport::default();
    for entity in entities {
        report.entities += 1;
        match run_entity(entity, work_dir, source, worker) {
            Ok(r) => report.totals.absorb(r),
            Err(e) => {
                tracing::warn!(entity = %entity, error = %format!("{:#}", e), "entity failed");
                report.failed.push((entity.clone(), format!("{:#}", e)));
            }
        }
    }
    report
}

/// Appends each URL on its own line. The file is created even when empty.
fn append_deferred(path: &Path, urls: &[String]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    for url in urls {
        writeln!(file, "{}", url).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}
