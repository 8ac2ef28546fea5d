//! HTML to plain text normalization.

use scraper::{Html, Selector};

/// Elements whose subtrees never carry announcement text.
const STRIPPED_ELEMENTS: &str = "nav, header, footer, script, style";

/// Collapse an HTML document to whitespace-joined plain text.
///
/// Parsing is lenient: html5ever recovers from malformed markup, so tag
/// soup never errors. Navigation chrome and non-content elements are cut
/// out before flattening; runs of whitespace collapse to single spaces.
#[must_use]
pub fn normalize_html(html: &str) -> String {
    let document = Html::parse_document(html);

    #[allow(clippy::expect_used)] // static selector that is guaranteed to be valid
    let stripped = Selector::parse(STRIPPED_ELEMENTS).expect("valid selector");
    #[allow(clippy::expect_used)]
    let body = Selector::parse("body").expect("valid selector");

    // Both serializations come from the same parsed tree, so each matched
    // subtree reappears verbatim inside the body markup and can be cut out.
    let mut markup = match document.select(&body).next() {
        Some(body) => body.inner_html(),
        None => document.root_element().inner_html(),
    };
    for element in document.select(&stripped) {
        markup = markup.replace(&element.html(), " ");
    }

    let content = Html::parse_fragment(&markup);
    let mut text = String::new();
    for piece in content.root_element().text() {
        for word in piece.split_whitespace() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(word);
        }
    }
    text
}
