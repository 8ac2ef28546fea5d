//! Daily summary retrieval and data model.
//!
//! The open-data API serializes the gazette summary as nested JSON whose
//! grouping fields are shape-variable: absent, a single object, or a list
//! of objects. Deserialization normalizes every such field to a `Vec`
//! once, so the rest of the crate never branches on shape.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::config::summary_url;
use crate::error::{Result, WatcherError};

/// Top-level summary response.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub data: SummaryData,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryData {
    #[serde(default)]
    pub sumario: SummaryNode,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryNode {
    #[serde(default, deserialize_with = "one_or_many")]
    pub diario: Vec<Diario>,
}

/// One gazette issue within a day's summary.
#[derive(Debug, Default, Deserialize)]
pub struct Diario {
    #[serde(default, deserialize_with = "one_or_many")]
    pub seccion: Vec<Seccion>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Seccion {
    pub codigo: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub apartado: Vec<Apartado>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub item: Vec<RawItem>,
}

/// A named subsection grouping items within a section.
#[derive(Debug, Default, Deserialize)]
pub struct Apartado {
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub item: Vec<RawItem>,
}

/// A publication item as the API serializes it.
#[derive(Debug, Default, Deserialize)]
pub struct RawItem {
    pub identificador: Option<String>,
    pub titulo: Option<String>,
    pub url_html: Option<UrlRef>,
    pub url_pdf: Option<UrlRef>,
}

/// Resource locator field: either a bare string or `{"texto": "..."}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UrlRef {
    Plain(String),
    Labeled { texto: String },
}

impl UrlRef {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(url) => url,
            Self::Labeled { texto } => texto,
        }
    }
}

/// Accept a JSON list, a single object, or null as a `Vec`.
fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
        Empty(Option<()>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
        OneOrMany::Empty(_) => Vec::new(),
    })
}

/// Fetch the structured daily summary for a date.
///
/// A 404 means no gazette was published that day (weekends, holidays) and
/// maps to `Ok(None)`. Any other non-success status, and any body that is
/// not the expected JSON, is an error for that date.
pub fn fetch_summary(
    client: &Client,
    base_url: &str,
    date: NaiveDate,
) -> Result<Option<SummaryResponse>> {
    let url = summary_url(base_url, date);
    let response = client.get(&url).send()?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        tracing::debug!(%date, "no summary published");
        return Ok(None);
    }
    if !status.is_success() {
        return Err(WatcherError::SummaryStatus { date, status });
    }

    let body = response.text()?;
    let summary =
        serde_json::from_str(&body).map_err(|source| WatcherError::SummaryParse { date, source })?;
    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diario_as_list() {
        let summary: SummaryResponse = serde_json::from_str(
            r#"{"data": {"sumario": {"diario": [{"seccion": []}, {"seccion": []}]}}}"#,
        )
        .unwrap();
        assert_eq!(summary.data.sumario.diario.len(), 2);
    }

    #[test]
    fn test_diario_as_single_object() {
        let summary: SummaryResponse =
            serde_json::from_str(r#"{"data": {"sumario": {"diario": {"seccion": []}}}}"#).unwrap();
        assert_eq!(summary.data.sumario.diario.len(), 1);
    }

    #[test]
    fn test_diario_absent_or_null() {
        let absent: SummaryResponse =
            serde_json::from_str(r#"{"data": {"sumario": {}}}"#).unwrap();
        assert!(absent.data.sumario.diario.is_empty());

        let null: SummaryResponse =
            serde_json::from_str(r#"{"data": {"sumario": {"diario": null}}}"#).unwrap();
        assert!(null.data.sumario.diario.is_empty());
    }

    #[test]
    fn test_empty_response_defaults() {
        let summary: SummaryResponse = serde_json::from_str("{}").unwrap();
        assert!(summary.data.sumario.diario.is_empty());
    }

    #[test]
    fn test_seccion_single_apartado_and_item() {
        let seccion: Seccion = serde_json::from_str(
            r#"{
                "codigo": "C",
                "apartado": {"nombre": "Convocatorias", "item": {"identificador": "X-1"}},
                "item": {"identificador": "X-2"}
            }"#,
        )
        .unwrap();
        assert_eq!(seccion.codigo.as_deref(), Some("C"));
        assert_eq!(seccion.apartado.len(), 1);
        assert_eq!(seccion.apartado[0].item.len(), 1);
        assert_eq!(seccion.item.len(), 1);
    }

    #[test]
    fn test_url_ref_plain_string() {
        let item: RawItem = serde_json::from_str(
            r#"{"identificador": "A-1", "url_html": "https://example.com/a1.html"}"#,
        )
        .unwrap();
        assert_eq!(
            item.url_html.unwrap().as_str(),
            "https://example.com/a1.html"
        );
    }

    #[test]
    fn test_url_ref_labeled_object() {
        let item: RawItem = serde_json::from_str(
            r#"{"identificador": "A-1", "url_html": {"texto": "https://example.com/a1.html", "szBytes": "4200"}}"#,
        )
        .unwrap();
        assert_eq!(
            item.url_html.unwrap().as_str(),
            "https://example.com/a1.html"
        );
    }
}
