//! Recognizer rules for SOCIMI regime-adoption language.
//!
//! Six canonical Spanish phrasings announce that a company enters the
//! special SOCIMI tax regime (Ley 11/2009). Rules are kept in a fixed
//! order: the first rule that matches a document wins, so the
//! `matched_pattern` attribution of an event is reproducible across runs.

use regex::{Regex, RegexBuilder};

use crate::error::{Result, WatcherError};

/// Canonical adoption phrasings, in attribution priority order.
const ADOPTION_RULES: [&str; 6] = [
    r"\b(acog(?:e|er(?:se)?|ida|ido|ieron|iéndose)|acuerda(?:n)?\s+acogerse)\s+(?:al?\s+)?r[ée]gimen(?:\s+fiscal)?\s+especial.*SOCIMI\b",
    r"\bopt(?:a|an|ó|aron|ar)\s+por\s+la\s+aplicaci[óo]n\s+del?\s+r[ée]gimen(?:\s+fiscal)?\s+especial.*SOCIMI\b",
    r"\bpas(?:a|arán|aron|ar)\s+a\s+tributar\s+por\s+el?\s+r[ée]gimen(?:\s+fiscal)?\s+especial.*SOCIMI\b",
    r"\bentrada\s+en\s+el?\s+r[ée]gimen(?:\s+fiscal)?\s+especial.*SOCIMI\b",
    r"\badaptaci[óo]n\s+de\s+estatutos.*(SOCIMI|Ley\s+11/2009).*r[ée]gimen\s+especial\b",
    r"\br[ée]gimen\s+fiscal\s+especial\s+de\s+las?\s+SOCIMI\b",
];

/// Ordered set of compiled adoption recognizer rules.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    rules: Vec<Regex>,
}

impl PatternLibrary {
    /// Compile the canonical rule set.
    #[must_use]
    #[allow(clippy::expect_used)] // canonical rules are known-valid
    pub fn standard() -> Self {
        Self::from_rules(&ADOPTION_RULES).expect("canonical rules compile")
    }

    /// Compile a custom rule set, preserving order.
    ///
    /// Rules are case-insensitive and `.` crosses line breaks, matching
    /// announcement text that wraps mid-phrase.
    pub fn from_rules(rules: &[&str]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build()
                    .map_err(|source| WatcherError::Pattern {
                        pattern: (*pattern).to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Rules in attribution priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Regex> {
        self.rules.iter()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::standard()
    }
}
