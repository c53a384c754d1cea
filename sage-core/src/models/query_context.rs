use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{SageError, SageResult};
use crate::intent::Intent;

/// Metadata filter key → expected value.
pub type MetadataFilters = BTreeMap<String, serde_json::Value>;

/// Everything an engine needs to know about one request.
///
/// Owned by the caller. The orchestrator writes the resolved intent back into
/// `intent` when it was unset, so the caller can observe the classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryContext {
    pub original_query: String,
    /// Decomposed sub-queries, in the order they were produced. May be empty.
    #[serde(default)]
    pub sub_queries: Vec<String>,
    #[serde(default)]
    pub metadata_filters: MetadataFilters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

impl QueryContext {
    pub fn new(original_query: impl Into<String>) -> Self {
        Self {
            original_query: original_query.into(),
            ..Default::default()
        }
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn with_sub_queries(mut self, sub_queries: Vec<String>) -> Self {
        self.sub_queries = sub_queries;
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata_filters.insert(key.into(), value);
        self
    }

    /// Reject contexts no engine could serve. Called before fan-out.
    pub fn validate(&self) -> SageResult<()> {
        if self.original_query.trim().is_empty() {
            return Err(SageError::InvalidQuery {
                reason: "original query must be non-empty".into(),
            });
        }
        if let Some(pos) = self.sub_queries.iter().position(|q| q.trim().is_empty()) {
            return Err(SageError::InvalidQuery {
                reason: format!("sub-query {pos} is empty"),
            });
        }
        if self.metadata_filters.keys().any(|k| k.trim().is_empty()) {
            return Err(SageError::InvalidQuery {
                reason: "metadata filter keys must be non-empty".into(),
            });
        }
        Ok(())
    }

    /// The original query followed by every sub-query.
    pub fn all_queries(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.original_query.as_str())
            .chain(self.sub_queries.iter().map(String::as_str))
    }
}
