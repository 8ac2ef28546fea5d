//! Selection of corporate-section items from a daily summary.

use crate::summary::{RawItem, SummaryResponse, UrlRef};

/// Section code housing corporate announcement filings (Sección II-C).
pub const CORPORATE_SECTION_CODE: &str = "C";

/// An entry from the corporate section of one day's summary.
///
/// Transient: lives only while its date is being processed, never
/// persisted directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionItem {
    /// Stable publication identifier; becomes the event key.
    pub identifier: String,

    /// Item title, typically the company name.
    pub company: Option<String>,

    /// Subsection the item was listed under, if any.
    pub apartado: Option<String>,

    pub url_html: Option<String>,
    pub url_pdf: Option<String>,
}

impl SectionItem {
    /// Items without an identifier cannot be keyed and are dropped.
    fn from_raw(raw: &RawItem, apartado: Option<&str>) -> Option<Self> {
        let identifier = raw
            .identificador
            .as_deref()
            .filter(|id| !id.is_empty())?
            .to_string();
        Some(Self {
            identifier,
            company: raw.titulo.clone(),
            apartado: apartado.map(str::to_string),
            url_html: url_text(raw.url_html.as_ref()),
            url_pdf: url_text(raw.url_pdf.as_ref()),
        })
    }
}

/// Empty URL strings count as absent.
fn url_text(url: Option<&UrlRef>) -> Option<String> {
    url.map(UrlRef::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

/// Walk a summary and yield every corporate-section item.
///
/// For each diario, each sección coded `C`: items under named apartados
/// come first (carrying the apartado name), then items attached directly
/// to the section. Restartable: re-deriving from the same summary yields
/// the same sequence.
pub fn section_items(summary: &SummaryResponse) -> impl Iterator<Item = SectionItem> + '_ {
    summary
        .data
        .sumario
        .diario
        .iter()
        .flat_map(|diario| diario.seccion.iter())
        .filter(|seccion| seccion.codigo.as_deref() == Some(CORPORATE_SECTION_CODE))
        .flat_map(|seccion| {
            let under_apartados = seccion.apartado.iter().flat_map(|apartado| {
                apartado
                    .item
                    .iter()
                    .map(move |item| (item, apartado.nombre.as_deref()))
            });
            let direct = seccion.item.iter().map(|item| (item, None));
            under_apartados.chain(direct)
        })
        .filter_map(|(item, apartado)| SectionItem::from_raw(item, apartado))
}
