//! Property tests for normalization and weighted fusion.

use std::collections::HashMap;

use proptest::prelude::*;

use sage_core::models::{EngineWeights, RetrievedNode};
use sage_retrieval::fusion::{fuse, min_max_normalize, EngineResults};
use test_fixtures::make_node;

/// Per-engine results: unique chunk ids drawn from a small pool so that
/// engines overlap, each with a finite raw score.
fn engine_strategy() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::hash_map(0usize..12, -50.0_f64..50.0, 0..8)
        .prop_map(|m| m.into_iter().map(|(i, s)| (format!("c{i:02}"), s)).collect())
}

fn build(engines: &[Vec<(String, f64)>]) -> Vec<EngineResults> {
    engines
        .iter()
        .enumerate()
        .map(|(i, pairs)| {
            let nodes = pairs.iter().map(|(id, s)| make_node(id, *s)).collect();
            EngineResults::new(format!("e{i}"), nodes)
        })
        .collect()
}

// =============================================================================
// Normalization stays in [0, 1]
// =============================================================================
proptest! {
    #[test]
    fn normalized_scores_are_in_unit_interval(
        scores in prop::collection::vec(-1e6_f64..1e6, 1..50)
    ) {
        let normalized = min_max_normalize(&scores);
        prop_assert_eq!(normalized.len(), scores.len());
        for v in normalized {
            prop_assert!((0.0..=1.0).contains(&v), "out of range: {}", v);
        }
    }
}

// =============================================================================
// A flat list normalizes to all ones
// =============================================================================
proptest! {
    #[test]
    fn flat_scores_normalize_to_one(value in -1e6_f64..1e6, len in 1usize..20) {
        let normalized = min_max_normalize(&vec![value; len]);
        prop_assert!(normalized.iter().all(|v| *v == 1.0));
    }
}

// =============================================================================
// Fused score is the weighted sum of normalized inputs
// =============================================================================
proptest! {
    #[test]
    fn fused_score_is_weighted_sum_of_normalized_inputs(
        engines in prop::collection::vec(engine_strategy(), 0..4),
        weights in prop::collection::vec(0.0_f64..1.0, 0..4),
    ) {
        let weights: EngineWeights = weights
            .iter()
            .enumerate()
            .map(|(i, w)| (format!("e{i}"), *w))
            .collect();
        let fused = fuse(build(&engines), &weights, 0.33);

        // Recompute from the raw input: Σ normalized × weight, 0.33 when unweighted.
        let mut expected: HashMap<&str, f64> = HashMap::new();
        let mut first_source: HashMap<&str, String> = HashMap::new();
        for (i, pairs) in engines.iter().enumerate() {
            let engine_id = format!("e{i}");
            let raw: Vec<f64> = pairs.iter().map(|(_, s)| *s).collect();
            let normalized = min_max_normalize(&raw);
            let weight = weights.weight_or(&engine_id, 0.33);
            for ((id, _), n) in pairs.iter().zip(normalized) {
                *expected.entry(id.as_str()).or_default() += n * weight;
                first_source.entry(id.as_str()).or_insert_with(|| engine_id.clone());
            }
        }

        for node in &fused {
            let want = expected[node.chunk_id()];
            prop_assert!(
                (node.score - want).abs() < 1e-9,
                "{}: fused {} expected {}", node.chunk_id(), node.score, want
            );
            prop_assert_eq!(&node.engine_source, &first_source[node.chunk_id()]);
        }

        // Every input chunk appears exactly once.
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for node in &fused {
            *seen.entry(node.chunk_id()).or_default() += 1;
        }
        prop_assert!(seen.values().all(|n| *n == 1));
        let distinct: std::collections::HashSet<&str> = engines
            .iter()
            .flat_map(|e| e.iter().map(|(id, _)| id.as_str()))
            .collect();
        prop_assert_eq!(seen.len(), distinct.len());
    }
}

// =============================================================================
// Output is sorted descending with ties broken by chunk id
// =============================================================================
proptest! {
    #[test]
    fn fused_output_is_ranked(
        engines in prop::collection::vec(engine_strategy(), 1..4),
    ) {
        let fused: Vec<RetrievedNode> = fuse(build(&engines), &EngineWeights::new(), 0.33);
        for pair in fused.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.score > b.score || (a.score == b.score && a.chunk_id() < b.chunk_id()),
                "{} ({}) before {} ({})", a.chunk_id(), a.score, b.chunk_id(), b.score
            );
        }
    }
}
