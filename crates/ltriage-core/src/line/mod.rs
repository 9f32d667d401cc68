//! Run-log line formats.
//!
//! Every consumer of the run log (filter, splitter, classifier) goes through
//! [`LineKind::lex`], so the recognised formats live in one place. The
//! producing side of the same formats (`session_start_line`,
//! `fetch_attempt_line`) sits next to it.

mod format;
mod lex;

pub use format::{fetch_attempt_line, session_start_line};
pub use lex::LineKind;

use std::fs;
use std::io;
use std::path::Path;

/// Prefix of the marker written when a new entity session starts.
pub const SESSION_START_PREFIX: &str = "Level 25: download user @";
/// Written by the query layer once the timeline has no more pages.
pub const PAGINATION_EXHAUSTED: &str = "Twitter returned : 'has_more_items'";
pub const FINAL_COUNT_PREFIX: &str = "INFO: Got";
pub const FINAL_COUNT_FROM_USERNAME: &str = "tweets from username";
pub const FETCH_ATTEMPT_PREFIX: &str = "INFO: download ";
pub const RETRY_COUNTER_MARKER: &str = " retry = ";
pub const PROXY_PREFIX: &str = "INFO: Using proxy ";
pub const SCRAPE_START_PREFIX: &str = "INFO: Scraping tweets from";
pub const DEPRECATION_MARKERS: [&str; 2] = [
    "DeprecationWarning",
    "elif isinstance(obj, collections.Iterable):",
];

/// True if `line` carries interpreter deprecation chatter, whatever else it
/// lexes as.
pub fn is_deprecation_noise(line: &str) -> bool {
    DEPRECATION_MARKERS.iter().any(|m| line.contains(m))
}

/// Counter carried by the last attempt before a fetch is exhausted.
pub const SOFT_FAILURE_COUNTER: u32 = 1;

/// Reads a log file into lines, each keeping its line terminator.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let data = fs::read_to_string(path)?;
    Ok(data.split_inclusive('\n').map(str::to_string).collect())
}

/// True if `owner` can be used as a single file or directory name.
pub fn is_valid_owner(owner: &str) -> bool {
    !owner.is_empty()
        && owner != "."
        && owner != ".."
        && !owner.contains(['/', '\\', '\0'])
}
