//! Pattern matching and excerpt extraction over normalized text.

use crate::patterns::PatternLibrary;

/// Characters of context kept on each side of a matched span.
pub const EXCERPT_MARGIN: usize = 140;

/// A recognizer rule hit with its audit excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptionHit {
    /// Source text of the rule that fired.
    pub pattern: String,

    /// Text window around the matched span.
    pub excerpt: String,
}

/// Run the library's rules in order against `text`; first match wins.
///
/// A document containing several distinct phrasings still records only the
/// earliest rule in library order, with one excerpt.
#[must_use]
pub fn find_adoption(patterns: &PatternLibrary, text: &str) -> Option<AdoptionHit> {
    for rule in patterns.iter() {
        if let Some(found) = rule.find(text) {
            let excerpt = excerpt_window(text, found.start(), found.end(), EXCERPT_MARGIN);
            return Some(AdoptionHit {
                pattern: rule.as_str().to_string(),
                excerpt: excerpt.to_string(),
            });
        }
    }
    None
}

/// Window of up to `margin` characters on each side of the byte span
/// `[start, end)`, clipped to the text bounds on UTF-8 char boundaries.
fn excerpt_window(text: &str, start: usize, end: usize, margin: usize) -> &str {
    let from = if margin == 0 {
        start
    } else {
        text[..start]
            .char_indices()
            .rev()
            .nth(margin - 1)
            .map_or(0, |(index, _)| index)
    };
    let to = text[end..]
        .char_indices()
        .nth(margin)
        .map_or(text.len(), |(index, _)| end + index);
    &text[from..to]
}
