//! Keyword heuristic intent classifier.
//!
//! Sets are checked in priority order; the first set with any substring
//! match wins. A query matching both a summary and a definition keyword is
//! a summary.

use sage_core::traits::IIntentClassifier;
use sage_core::Intent;

/// (intent, keywords) in priority order. `General` is the fallback, not a set.
const KEYWORD_SETS: [(Intent, &[&str]); 4] = [
    (Intent::Summary, &["summary", "summarize", "summarise", "overview"]),
    (Intent::Definition, &["definition", "define", "what is", "meaning"]),
    (
        Intent::Relationship,
        &["relationship", "connect", "between", "how does"],
    ),
    (Intent::Comparison, &["compare", "difference", "vs", "versus"]),
];

/// Case-insensitive substring classifier. Total: unmatched text is `General`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordIntentClassifier;

impl KeywordIntentClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl IIntentClassifier for KeywordIntentClassifier {
    fn classify(&self, query: &str) -> Intent {
        let query = query.to_lowercase();
        KEYWORD_SETS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| query.contains(k)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
