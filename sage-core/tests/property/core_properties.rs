//! Property tests for intent parsing, weight vectors, and metadata filters.

use std::collections::BTreeMap;

use proptest::prelude::*;

use sage_core::intent::Intent;
use sage_core::models::{Chunk, DocumentMetadata, EngineWeights};

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop::sample::select(Intent::ALL.to_vec())
}

proptest! {
    #[test]
    fn intent_names_parse_back_in_any_case(intent in intent_strategy(), upper in any::<bool>()) {
        let name = if upper {
            intent.as_str().to_uppercase()
        } else {
            intent.as_str().to_string()
        };
        prop_assert_eq!(format!("  {name} ").parse::<Intent>().unwrap(), intent);
    }
}

proptest! {
    #[test]
    fn unknown_engines_always_get_the_default(
        pairs in prop::collection::btree_map("[a-z]{1,6}", 0.0_f64..1.0, 0..6),
        default in 0.0_f64..1.0,
    ) {
        let weights: EngineWeights = pairs.clone().into_iter().collect();
        for (id, w) in &pairs {
            prop_assert_eq!(weights.weight_or(id, default), *w);
        }
        prop_assert_eq!(weights.weight_or("UNKNOWN", default), default);
        let sum: f64 = pairs.values().sum();
        prop_assert!((weights.total() - sum).abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn filters_match_only_on_equal_values(book in "[a-z]{1,8}", other in "[a-z]{1,8}") {
        let chunk = Chunk {
            chunk_id: "c".into(),
            document_id: "d".into(),
            content: String::new(),
            metadata: DocumentMetadata::new(book.clone(), "title"),
        };
        let mut filters = BTreeMap::new();
        filters.insert("book_id".to_string(), serde_json::Value::String(other.clone()));
        prop_assert_eq!(chunk.matches_filters(&filters), book == other);
    }
}
