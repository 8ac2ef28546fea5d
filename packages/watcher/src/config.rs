//! Configuration constants and date helpers for the watcher.

use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Europe::Madrid;

use crate::error::{Result, WatcherError};

/// Base URL of the BORME daily summary API.
///
/// The summary for a date lives at `{base}/{YYYYMMDD}`.
pub const SUMMARY_BASE_URL: &str = "https://www.boe.es/datosabiertos/api/borme/sumario";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default pause between per-date iterations, in milliseconds.
///
/// Self-imposed rate limiting towards the gazette server; not adaptive.
pub const DEFAULT_COURTESY_DELAY_MS: u64 = 400;

/// Default SQLite database file.
pub const DEFAULT_DB_FILE: &str = "socimi_borme.db";

/// Default CSV export file.
pub const DEFAULT_CSV_FILE: &str = "socimi_borme.csv";

/// Tunables for a watcher run.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Summary endpoint base; tests point this at a mock server.
    pub summary_base_url: String,

    /// Pause between per-date iterations.
    pub courtesy_delay: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            summary_base_url: SUMMARY_BASE_URL.to_string(),
            courtesy_delay: Duration::from_millis(DEFAULT_COURTESY_DELAY_MS),
        }
    }
}

/// Today's date on the gazette's publication calendar (Europe/Madrid).
#[must_use]
pub fn madrid_today() -> NaiveDate {
    chrono::Utc::now().with_timezone(&Madrid).date_naive()
}

/// Format a date in the compact numeric form the summary endpoint expects.
#[must_use]
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Parse a YYYY-MM-DD date argument.
///
/// # Examples
/// ```
/// use socimi_watcher::config::parse_iso_date;
///
/// assert!(parse_iso_date("2025-01-01").is_ok());
/// assert!(parse_iso_date("01-01-2025").is_err());
/// ```
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| WatcherError::InvalidDate(value.to_string()))
}

/// Build the summary URL for a date.
#[must_use]
pub fn summary_url(base_url: &str, date: NaiveDate) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), compact_date(date))
}
