//! Fetch errors. Every variant consumes one attempt.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the destination failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}
