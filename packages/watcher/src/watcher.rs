//! Date-window orchestration: the end-to-end detection pipeline.

use std::thread;

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::config::WatcherConfig;
use crate::detect::find_adoption;
use crate::document::fetch_document;
use crate::error::{Result, WatcherError};
use crate::http::create_client;
use crate::patterns::PatternLibrary;
use crate::section::section_items;
use crate::store::{AdoptionEvent, EventStore};
use crate::summary::fetch_summary;
use crate::text::normalize_html;

/// Outcome of processing an inclusive date range.
///
/// Failures are carried alongside the count instead of aborting the run:
/// a date that fails contributes zero events and the range keeps going.
#[derive(Debug, Default)]
pub struct RangeReport {
    /// Events newly stored (or refreshed) across the range.
    pub new_events: usize,

    /// Dates whose processing failed, with the reason.
    pub failures: Vec<(NaiveDate, WatcherError)>,
}

/// Drives the detection pipeline over calendar dates.
///
/// Owns the HTTP client, the pattern library, and the event store; all
/// processing is sequential, one date at a time and one item at a time.
pub struct Watcher {
    client: Client,
    config: WatcherConfig,
    patterns: PatternLibrary,
    store: EventStore,
}

impl Watcher {
    /// Build a watcher with the canonical pattern set.
    pub fn new(store: EventStore, config: WatcherConfig) -> Result<Self> {
        Self::with_patterns(store, config, PatternLibrary::standard())
    }

    /// Build a watcher with a custom pattern set.
    pub fn with_patterns(
        store: EventStore,
        config: WatcherConfig,
        patterns: PatternLibrary,
    ) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            config,
            patterns,
            store,
        })
    }

    /// The underlying store; the export collaborator reads through this.
    #[must_use]
    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Process one gazette date; returns the number of events stored.
    ///
    /// No summary (nothing published that day) is a normal zero. Items
    /// without a fetchable HTML document are skipped. A store write
    /// failure aborts the date.
    pub fn process_date(&self, date: NaiveDate) -> Result<usize> {
        let Some(summary) = fetch_summary(&self.client, &self.config.summary_base_url, date)?
        else {
            tracing::debug!(%date, "no gazette published");
            return Ok(0);
        };

        let mut stored = 0;
        for item in section_items(&summary) {
            let Some(url_html) = item.url_html.clone() else {
                continue;
            };
            let Some(html) = fetch_document(&self.client, &url_html) else {
                continue;
            };
            let text = normalize_html(&html);
            let Some(hit) = find_adoption(&self.patterns, &text) else {
                continue;
            };

            let event = AdoptionEvent {
                id: item.identifier,
                pub_date: date.format("%Y-%m-%d").to_string(),
                company: item.company,
                apartado: item.apartado,
                url_html: Some(url_html),
                url_pdf: item.url_pdf,
                matched_pattern: hit.pattern,
                excerpt: hit.excerpt,
            };
            self.store.upsert(&event)?;
            stored += 1;
            tracing::info!(id = %event.id, %date, company = ?event.company, "stored adoption event");
        }
        Ok(stored)
    }

    /// Process an inclusive date range, isolating per-date failures.
    ///
    /// A date that fails is reported and contributes zero events;
    /// iteration always continues to the next date. A courtesy pause
    /// separates successive dates.
    pub fn process_range(&self, start: NaiveDate, end: NaiveDate) -> RangeReport {
        let mut report = RangeReport::default();
        let mut first = true;
        for date in date_range(start, end) {
            if !first {
                thread::sleep(self.config.courtesy_delay);
            }
            first = false;

            match self.process_date(date) {
                Ok(stored) => report.new_events += stored,
                Err(error) => {
                    tracing::warn!(%date, %error, "date failed, continuing");
                    report.failures.push((date, error));
                }
            }
        }
        report
    }
}

/// Inclusive day iterator; empty when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |date| *date <= end)
}
