//! CSV export of the event store.
//!
//! Fixed column order matching the persisted schema; RFC-4180-style
//! quoting (fields containing the separator, quotes, or line breaks are
//! quoted, embedded quotes doubled).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::store::{AdoptionEvent, EventStore};

/// Column order; matches the persisted schema.
pub const CSV_COLUMNS: [&str; 8] = [
    "id",
    "pub_date",
    "company",
    "apartado",
    "url_html",
    "url_pdf",
    "matched_pattern",
    "excerpt",
];

/// Write the whole store to a CSV file; returns the number of data rows.
pub fn export_csv(store: &EventStore, path: &Path) -> Result<usize> {
    let events = store.list_all()?;
    let mut out = BufWriter::new(File::create(path)?);
    write_csv(&events, &mut out)?;
    out.flush()?;
    Ok(events.len())
}

/// Write a header row followed by one row per event, in slice order.
pub fn write_csv<W: Write>(events: &[AdoptionEvent], mut out: W) -> io::Result<()> {
    write_row(&mut out, CSV_COLUMNS)?;
    for event in events {
        write_row(
            &mut out,
            [
                event.id.as_str(),
                event.pub_date.as_str(),
                event.company.as_deref().unwrap_or(""),
                event.apartado.as_deref().unwrap_or(""),
                event.url_html.as_deref().unwrap_or(""),
                event.url_pdf.as_deref().unwrap_or(""),
                event.matched_pattern.as_str(),
                event.excerpt.as_str(),
            ],
        )?;
    }
    Ok(())
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(out: &mut W, fields: [&str; 8]) -> io::Result<()> {
    let mut first = true;
    for field in fields {
        if !first {
            write!(out, ",")?;
        }
        first = false;
        if needs_quotes(field) {
            write!(out, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            write!(out, "{field}")?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(id: &str) -> AdoptionEvent {
        AdoptionEvent {
            id: id.to_string(),
            pub_date: "2025-03-07".to_string(),
            company: Some("ALPHA SOCIMI, S.A.".to_string()),
            apartado: None,
            url_html: Some("https://boe.es/a.html".to_string()),
            url_pdf: None,
            matched_pattern: "acogerse".to_string(),
            excerpt: "acuerda acogerse al régimen".to_string(),
        }
    }

    fn render(events: &[AdoptionEvent]) -> String {
        let mut buffer = Vec::new();
        write_csv(events, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(
            render(&[]),
            "id,pub_date,company,apartado,url_html,url_pdf,matched_pattern,excerpt\n"
        );
    }

    #[test]
    fn test_row_in_column_order() {
        let output = render(&[event("BORME-C-2025-100")]);
        let mut lines = output.lines();
        lines.next();
        assert_eq!(
            lines.next().unwrap(),
            "BORME-C-2025-100,2025-03-07,\"ALPHA SOCIMI, S.A.\",,https://boe.es/a.html,,acogerse,acuerda acogerse al régimen"
        );
    }

    #[test]
    fn test_quotes_are_doubled() {
        let mut noisy = event("X-1");
        noisy.company = Some("Sociedad \"Alfa\"".to_string());
        let output = render(&[noisy]);
        assert!(output.contains("\"Sociedad \"\"Alfa\"\"\""));
    }

    #[test]
    fn test_newlines_are_quoted() {
        let mut noisy = event("X-1");
        noisy.excerpt = "línea una\nlínea dos".to_string();
        let output = render(&[noisy]);
        assert!(output.contains("\"línea una\nlínea dos\""));
    }

    #[test]
    fn test_rows_preserve_slice_order() {
        let output = render(&[event("X-2"), event("X-1")]);
        let ids: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(ids, ["X-2", "X-1"]);
    }
}
