//! Outcome classification of a sealed session segment.
//!
//! Both predicates are exact-shape matches over the lines the fetch worker and
//! the query layer produce. A segment that matches neither is left
//! undetermined for a human to read.

use crate::line::{LineKind, SOFT_FAILURE_COUNTER};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    MissingImages,
    Undetermined,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Success => "success",
            Classification::MissingImages => "missing_images",
            Classification::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Results of both predicates, evaluated independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verdict {
    pub success: bool,
    pub missing_images: bool,
}

impl Verdict {
    pub fn of<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            success: is_success(lines),
            missing_images: is_missing_image(lines),
        }
    }

    pub fn classification(self) -> Classification {
        if self.success {
            Classification::Success
        } else if self.missing_images {
            Classification::MissingImages
        } else {
            Classification::Undetermined
        }
    }
}

pub fn classify<S: AsRef<str>>(lines: &[S]) -> Classification {
    Verdict::of(lines).classification()
}

/// The minimal clean session: marker, last page reached, per-user total.
/// Nothing more, nothing less, in that order.
pub fn is_success<S: AsRef<str>>(lines: &[S]) -> bool {
    let [first, second, third] = lines else {
        return false;
    };
    LineKind::lex(first.as_ref()).is_session_start()
        && LineKind::lex(second.as_ref()) == LineKind::PaginationExhausted
        && LineKind::lex(third.as_ref())
            == LineKind::FinalCount {
                from_username: true,
            }
}

/// A session whose only problems are images that reached their last attempt.
///
/// Markers, pagination and totals are transparent; any other line ends the
/// scan with `false`.
pub fn is_missing_image<S: AsRef<str>>(lines: &[S]) -> bool {
    let mut soft_failure = false;
    for l in lines {
        match LineKind::lex(l.as_ref()) {
            LineKind::SessionStart { .. }
            | LineKind::PaginationExhausted
            | LineKind::FinalCount { .. } => {}
            LineKind::FetchAttempt {
                remaining: Some(SOFT_FAILURE_COUNTER),
                ..
            } => soft_failure = true,
            _ => return false,
        }
    }
    soft_failure
}
