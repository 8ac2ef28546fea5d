//! Error types for the watcher.
//!
//! One library-level error enum with detailed context per variant; the
//! per-date catch boundary in the window processor is the only place that
//! converts errors into reported-and-continue outcomes.

use chrono::NaiveDate;
use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the watcher library.
#[derive(Debug, Error)]
pub enum WatcherError {
    /// Invalid date format.
    #[error("Invalid date format: '{0}'. Expected YYYY-MM-DD (e.g., 2025-01-01)")]
    InvalidDate(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Summary endpoint answered with an unexpected status.
    ///
    /// 404 is not an error (no gazette published that day); anything else
    /// non-2xx lands here.
    #[error("Summary request for {date} returned {status}")]
    SummaryStatus { date: NaiveDate, status: StatusCode },

    /// Summary body could not be parsed as the expected JSON structure.
    #[error("Failed to parse summary for {date}: {source}")]
    SummaryParse {
        date: NaiveDate,
        #[source]
        source: serde_json::Error,
    },

    /// An adoption rule failed to compile.
    #[error("Invalid adoption pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Event store operation failed.
    #[error("Event store operation failed: {0}")]
    Store(#[from] rusqlite::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, WatcherError>;
