//! Integration test: curl-backed retry worker against a local HTTP server.

mod common;

use common::media_server::{self, Route};
use ltriage_core::fetch::{
    ArtifactFetcher, CurlFetcher, FetchError, FetchOutcome, MemoryRunLog, RetryFetchWorker,
};
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

fn routes() -> HashMap<String, Route> {
    let mut r = HashMap::new();
    r.insert("/media/ok.jpg".to_string(), Route::ok(b"jpeg bytes"));
    r.insert(
        "/media/flaky.jpg".to_string(),
        Route {
            body: b"eventually".to_vec(),
            fail_first: 2,
        },
    );
    r
}

#[test]
fn curl_fetcher_writes_body_on_success() {
    let server = media_server::start(routes());
    let dir = tempdir().unwrap();
    let dest = dir.path().join("ok.jpg");

    CurlFetcher::default()
        .fetch(&server.url("/media/ok.jpg"), &dest)
        .unwrap();
    assert_eq!(fs::read(&dest).unwrap(), b"jpeg bytes");
}

#[test]
fn curl_fetcher_http_error_leaves_no_file() {
    let server = media_server::start(routes());
    let dir = tempdir().unwrap();
    let dest = dir.path().join("gone.jpg");

    let err = CurlFetcher::default()
        .fetch(&server.url("/media/gone.jpg"), &dest)
        .unwrap_err();
    assert!(matches!(err, FetchError::Http(404)));
    assert!(!dest.exists());
}

#[test]
fn worker_retries_flaky_route_then_skips_on_rerun() {
    let server = media_server::start(routes());
    let dir = tempdir().unwrap();
    let dest = dir.path().join("flaky.jpg");
    let url = server.url("/media/flaky.jpg");

    let mut worker = RetryFetchWorker::new(CurlFetcher::default(), MemoryRunLog::default(), 5);
    let task = worker.task(url.as_str(), &dest);
    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Fetched);
    assert_eq!(fs::read(&dest).unwrap(), b"eventually");
    assert_eq!(server.requests(), 3);

    let task = worker.task(url.as_str(), &dest);
    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Skipped);
    assert_eq!(server.requests(), 3);

    let (_, log) = worker.into_parts();
    assert_eq!(
        log.lines,
        vec![
            format!("INFO: download {}, retry = 5", url),
            format!("INFO: download {}, retry = 4", url),
            format!("INFO: download {}, retry = 3", url),
        ]
    );
}

#[test]
fn worker_exhausts_on_missing_route() {
    let server = media_server::start(routes());
    let dir = tempdir().unwrap();
    let url = server.url("/media/gone.jpg");

    let mut worker = RetryFetchWorker::new(CurlFetcher::default(), MemoryRunLog::default(), 5);
    let task = worker.task(url.as_str(), dir.path().join("gone.jpg"));
    assert_eq!(worker.fetch(task).unwrap(), FetchOutcome::Exhausted);
    assert_eq!(server.requests(), 5);
    assert_eq!(worker.run_log_mut().lines.len(), 5);
}
