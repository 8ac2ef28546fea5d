//! Durable event storage.
//!
//! A single SQLite table keyed by publication identifier. One writer, one
//! implicit transaction per call; SQLite's own locking covers the
//! single-writer access the watcher needs.

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::Result;

/// Schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS socimi_events (
    id              TEXT PRIMARY KEY,
    pub_date        TEXT NOT NULL,
    company         TEXT,
    apartado        TEXT,
    url_html        TEXT,
    url_pdf         TEXT,
    matched_pattern TEXT,
    excerpt         TEXT
);
";

/// Durable record of one detected adoption announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptionEvent {
    /// Publication identifier; the primary key.
    pub id: String,

    /// Publication date in ISO form.
    pub pub_date: String,

    pub company: Option<String>,
    pub apartado: Option<String>,
    pub url_html: Option<String>,
    pub url_pdf: Option<String>,

    /// Source text of the rule that fired.
    pub matched_pattern: String,

    /// Audit window around the match.
    pub excerpt: String,
}

/// SQLite store for adoption events.
pub struct EventStore {
    conn: Connection,
}

impl EventStore {
    /// Open or create the store at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an ephemeral in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert an event, or replace every non-key field if `id` exists.
    ///
    /// Last write wins: re-processing an identifier (a corrected
    /// republication, a re-run over the same window) refreshes the row
    /// instead of duplicating it.
    pub fn upsert(&self, event: &AdoptionEvent) -> Result<()> {
        self.conn.execute(
            "INSERT INTO socimi_events \
                 (id, pub_date, company, apartado, url_html, url_pdf, matched_pattern, excerpt) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
             ON CONFLICT(id) DO UPDATE SET \
                 pub_date = excluded.pub_date, \
                 company = excluded.company, \
                 apartado = excluded.apartado, \
                 url_html = excluded.url_html, \
                 url_pdf = excluded.url_pdf, \
                 matched_pattern = excluded.matched_pattern, \
                 excerpt = excluded.excerpt",
            params![
                event.id,
                event.pub_date,
                event.company,
                event.apartado,
                event.url_html,
                event.url_pdf,
                event.matched_pattern,
                event.excerpt,
            ],
        )?;
        Ok(())
    }

    /// All stored events, newest publication date first, id descending
    /// within a date.
    pub fn list_all(&self) -> Result<Vec<AdoptionEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, pub_date, company, apartado, url_html, url_pdf, matched_pattern, excerpt \
             FROM socimi_events ORDER BY pub_date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(AdoptionEvent {
                id: row.get(0)?,
                pub_date: row.get(1)?,
                company: row.get(2)?,
                apartado: row.get(3)?,
                url_html: row.get(4)?,
                url_pdf: row.get(5)?,
                matched_pattern: row.get(6)?,
                excerpt: row.get(7)?,
            })
        })?;

        let mut events = Vec::new();
        for event in rows {
            events.push(event?);
        }
        Ok(events)
    }

    /// Number of stored events.
    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM socimi_events", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_event(id: &str, pub_date: &str) -> AdoptionEvent {
        AdoptionEvent {
            id: id.to_string(),
            pub_date: pub_date.to_string(),
            company: Some("ALPHA SOCIMI, S.A.".to_string()),
            apartado: Some("Otros anuncios".to_string()),
            url_html: Some("https://boe.es/a.html".to_string()),
            url_pdf: None,
            matched_pattern: "acogerse".to_string(),
            excerpt: "… acuerda acogerse al régimen …".to_string(),
        }
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let store = EventStore::open_in_memory().unwrap();
        let event = sample_event("BORME-C-2025-100", "2025-03-07");

        store.upsert(&event).unwrap();
        store.upsert(&event).unwrap();

        let events = store.list_all().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], event);
    }

    #[test]
    fn test_upsert_overwrites_on_same_id() {
        let store = EventStore::open_in_memory().unwrap();
        store
            .upsert(&sample_event("BORME-C-2025-100", "2025-03-07"))
            .unwrap();

        let mut corrected = sample_event("BORME-C-2025-100", "2025-03-10");
        corrected.company = Some("ALPHA SOCIMI, SOCIEDAD ANONIMA".to_string());
        corrected.matched_pattern = "optar".to_string();
        store.upsert(&corrected).unwrap();

        let events = store.list_all().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], corrected);
    }

    #[test]
    fn test_list_all_orders_by_date_then_id_descending() {
        let store = EventStore::open_in_memory().unwrap();
        store.upsert(&sample_event("BORME-C-2025-1", "2025-01-02")).unwrap();
        store.upsert(&sample_event("BORME-C-2025-9", "2025-01-02")).unwrap();
        store.upsert(&sample_event("BORME-C-2025-5", "2025-02-01")).unwrap();

        let ids: Vec<String> = store.list_all().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(
            ids,
            ["BORME-C-2025-5", "BORME-C-2025-9", "BORME-C-2025-1"]
        );
    }

    #[test]
    fn test_count() {
        let store = EventStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        store.upsert(&sample_event("BORME-C-2025-1", "2025-01-02")).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.db");

        {
            let store = EventStore::open(&path).unwrap();
            store.upsert(&sample_event("BORME-C-2025-1", "2025-01-02")).unwrap();
        }

        let reopened = EventStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }
}
