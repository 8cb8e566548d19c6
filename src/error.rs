//! Error type for the fetch boundary and source configuration.
//!
//! Nothing in here escapes [`crate::feeds::fetcher::fetch_feed`]: fetch
//! failures are logged and collapse into an empty item list for that source.
//! Configuration errors are the exception and propagate to the caller.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response status: {0}")]
    Status(reqwest::StatusCode),

    #[error("response body was empty")]
    EmptyBody,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid source configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("source configuration lists no feeds")]
    NoSources,
}
