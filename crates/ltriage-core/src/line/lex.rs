//! Tagging of raw lines.

use super::{
    FETCH_ATTEMPT_PREFIX, FINAL_COUNT_FROM_USERNAME, FINAL_COUNT_PREFIX,
    PAGINATION_EXHAUSTED, PROXY_PREFIX, RETRY_COUNTER_MARKER, SCRAPE_START_PREFIX,
    SESSION_START_PREFIX,
};

/// What a single run-log line is, as far as triage cares.
///
/// Computed from the line with surrounding whitespace (and its terminator)
/// removed. Borrowed fields point into the original line. A line gets one
/// kind; structural kinds win over [`LineKind::Deprecation`], so a page or
/// count line carrying a warning fragment still lexes as what it is. The
/// filter drops deprecation chatter separately via
/// [`is_deprecation_noise`](super::is_deprecation_noise).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// `Level 25: download user @<owner>`.
    SessionStart { owner: &'a str },
    /// Query layer reported the last page.
    PaginationExhausted,
    /// `INFO: Got ...`; `from_username` when it is the per-user total.
    FinalCount { from_username: bool },
    /// `INFO: download <url>, retry = <n>`. `remaining` is `None` when the
    /// counter is missing or not a number.
    FetchAttempt { url: &'a str, remaining: Option<u32> },
    ProxySelection,
    /// Interpreter deprecation chatter, including the echoed source line.
    Deprecation,
    ScrapeStart,
    Other,
}

impl<'a> LineKind<'a> {
    pub fn lex(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return LineKind::Blank;
        }
        if let Some(owner) = line.strip_prefix(SESSION_START_PREFIX) {
            return LineKind::SessionStart {
                owner: owner.trim(),
            };
        }
        if line.contains(PAGINATION_EXHAUSTED) {
            return LineKind::PaginationExhausted;
        }
        if line.starts_with(FINAL_COUNT_PREFIX) {
            return LineKind::FinalCount {
                from_username: line.contains(FINAL_COUNT_FROM_USERNAME),
            };
        }
        if let Some(rest) = line.strip_prefix(FETCH_ATTEMPT_PREFIX) {
            return fetch_attempt(rest);
        }
        if line.starts_with(PROXY_PREFIX) {
            return LineKind::ProxySelection;
        }
        if super::is_deprecation_noise(line) {
            return LineKind::Deprecation;
        }
        if line.starts_with(SCRAPE_START_PREFIX) {
            return LineKind::ScrapeStart;
        }
        LineKind::Other
    }

    pub fn is_session_start(&self) -> bool {
        matches!(self, LineKind::SessionStart { .. })
    }
}

fn fetch_attempt(rest: &str) -> LineKind<'_> {
    match rest.rsplit_once(RETRY_COUNTER_MARKER) {
        Some((url, counter)) => LineKind::FetchAttempt {
            url: url.trim_end().trim_end_matches(','),
            remaining: counter.trim().parse().ok(),
        },
        None => LineKind::FetchAttempt {
            url: rest,
            remaining: None,
        },
    }
}
