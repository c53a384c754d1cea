use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Bibliographic metadata attached to every chunk of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub book_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Table-of-contents path, e.g. `/part-1/ch3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toc_path: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_attributes: BTreeMap<String, serde_json::Value>,
}

impl DocumentMetadata {
    pub fn new(book_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            book_id: book_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Look up a filterable attribute. The well-known fields shadow
    /// `extra_attributes` entries of the same name.
    pub fn attribute(&self, key: &str) -> Option<serde_json::Value> {
        match key {
            "book_id" => Some(serde_json::Value::String(self.book_id.clone())),
            "title" => Some(serde_json::Value::String(self.title.clone())),
            "author" => self.author.clone().map(serde_json::Value::String),
            "toc_path" => self.toc_path.clone().map(serde_json::Value::String),
            other => self.extra_attributes.get(other).cloned(),
        }
    }
}

/// A unit of indexed content. `chunk_id` is the identity used for fusion merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: String,
    pub document_id: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Chunk {
    /// True when every filter key resolves to an equal metadata value.
    /// An empty filter map matches everything.
    pub fn matches_filters(&self, filters: &BTreeMap<String, serde_json::Value>) -> bool {
        filters
            .iter()
            .all(|(key, expected)| self.metadata.attribute(key).as_ref() == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chunk() -> Chunk {
        let mut metadata = DocumentMetadata::new("book-1", "Dune");
        metadata.toc_path = Some("/ch1".into());
        metadata
            .extra_attributes
            .insert("language".into(), json!("en"));
        Chunk {
            chunk_id: "c1".into(),
            document_id: "d1".into(),
            content: "spice".into(),
            metadata,
        }
    }

    #[test]
    fn empty_filters_match() {
        assert!(chunk().matches_filters(&BTreeMap::new()));
    }

    #[test]
    fn filters_check_known_fields_and_extras() {
        let c = chunk();
        let mut filters = BTreeMap::new();
        filters.insert("book_id".to_string(), json!("book-1"));
        filters.insert("language".to_string(), json!("en"));
        assert!(c.matches_filters(&filters));

        filters.insert("toc_path".to_string(), json!("/ch2"));
        assert!(!c.matches_filters(&filters));
    }

    #[test]
    fn missing_attribute_does_not_match() {
        let mut filters = BTreeMap::new();
        filters.insert("author".to_string(), json!("Herbert"));
        assert!(!chunk().matches_filters(&filters));
    }
}
