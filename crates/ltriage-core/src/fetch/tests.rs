use super::*;
use std::fs;
use tempfile::tempdir;

/// Fails the first `failures` calls, then writes the destination.
struct Scripted {
    failures: u32,
    calls: u32,
}

impl Scripted {
    fn failing(failures: u32) -> Self {
        Self { failures, calls: 0 }
    }
}

impl ArtifactFetcher for Scripted {
    fn fetch(&mut self, _url: &str, dest: &Path) -> Result<(), FetchError> {
        self.calls += 1;
        if self.calls <= self.failures {
            return Err(FetchError::Http(503));
        }
        fs::write(dest, b"img")?;
        Ok(())
    }
}

const URL: &str = "https://pbs.example.com/media/a.jpg";

#[test]
fn first_attempt_success_logs_once() {
    let dir = tempdir().unwrap();
    let mut worker = RetryFetchWorker::new(Scripted::failing(0), MemoryRunLog::default(), 5);
    let task = worker.task(URL, dir.path().join("a.jpg"));

    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Fetched);
    let (fetcher, log) = worker.into_parts();
    assert_eq!(fetcher.calls, 1);
    assert_eq!(log.lines, vec![format!("INFO: download {}, retry = 5", URL)]);
}

#[test]
fn retries_count_down_until_success() {
    let dir = tempdir().unwrap();
    let mut worker = RetryFetchWorker::new(Scripted::failing(2), MemoryRunLog::default(), 5);
    let task = worker.task(URL, dir.path().join("a.jpg"));

    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Fetched);
    let (_, log) = worker.into_parts();
    let counters: Vec<_> = log
        .lines
        .iter()
        .map(|l| l.rsplit(' ').next().unwrap().to_string())
        .collect();
    assert_eq!(counters, vec!["5", "4", "3"]);
}

#[test]
fn exhaustion_logs_every_attempt_and_does_not_fail() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a.jpg");
    let mut worker = RetryFetchWorker::new(Scripted::failing(u32::MAX), MemoryRunLog::default(), 5);
    let task = worker.task(URL, &dest);

    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Exhausted);
    let (fetcher, log) = worker.into_parts();
    assert_eq!(fetcher.calls, 5);
    assert_eq!(log.lines.len(), 5);
    assert_eq!(
        log.lines.last().unwrap(),
        &format!("INFO: download {}, retry = 1", URL)
    );
    assert!(!dest.exists());
}

#[test]
fn existing_destination_is_skipped_without_io() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a.jpg");
    fs::write(&dest, b"partial").unwrap();

    let mut worker = RetryFetchWorker::new(Scripted::failing(0), MemoryRunLog::default(), 5);
    let task = worker.task(URL, &dest);
    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Skipped);
    let (fetcher, log) = worker.into_parts();
    assert_eq!(fetcher.calls, 0);
    assert!(log.lines.is_empty());
    assert_eq!(fs::read(&dest).unwrap(), b"partial");
}

#[test]
fn second_run_is_silent() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a.jpg");
    let mut fetcher = Scripted::failing(0);

    let mut log = MemoryRunLog::default();
    let mut worker = RetryFetchWorker::new(&mut fetcher, &mut log, 5);
    let task = worker.task(URL, &dest);
    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Fetched);
    assert_eq!(log.lines.len(), 1);

    let mut second = MemoryRunLog::default();
    let mut worker = RetryFetchWorker::new(&mut fetcher, &mut second, 5);
    let task = worker.task(URL, &dest);
    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Skipped);
    assert!(second.lines.is_empty());
    assert_eq!(fetcher.calls, 1);
}

#[test]
fn zero_budget_is_exhausted_immediately() {
    let dir = tempdir().unwrap();
    let mut worker = RetryFetchWorker::new(Scripted::failing(0), MemoryRunLog::default(), 0);
    let task = worker.task(URL, dir.path().join("a.jpg"));
    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Exhausted);
    assert!(worker.run_log_mut().lines.is_empty());
}

#[test]
fn run_log_failure_is_reported() {
    struct Broken;
    impl RunLog for Broken {
        fn record(&mut self, _line: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "read-only"))
        }
    }

    let dir = tempdir().unwrap();
    let mut worker = RetryFetchWorker::new(Scripted::failing(0), Broken, 5);
    let task = worker.task(URL, dir.path().join("a.jpg"));
    assert!(worker.fetch(task).is_err());
}

#[test]
fn attempt_lines_survive_filter_only_at_last_attempt() {
    use crate::filter::LineFilter;

    let dir = tempdir().unwrap();
    let mut worker = RetryFetchWorker::new(Scripted::failing(u32::MAX), MemoryRunLog::default(), 5);
    let task = worker.task(URL, dir.path().join("a.jpg"));
    worker.fetch(task).unwrap();
    let (_, log) = worker.into_parts();

    let kept = LineFilter::for_attempt_budget(DEFAULT_ATTEMPT_BUDGET).filter(log.lines);
    assert_eq!(kept, vec![format!("INFO: download {}, retry = 1", URL)]);
}
