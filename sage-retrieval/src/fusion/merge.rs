//! Weighted score fusion across engines.
//!
//! fused(chunk) = Σ over engines that returned it of normalized × weight,
//! where an engine missing from the weight vector gets the default weight.

use std::cmp::Ordering;
use std::collections::HashMap;

use sage_core::models::{EngineWeights, RetrievedNode, ScoreContribution};
use sage_observability::tracing_setup::events;

use super::normalize::min_max_normalize;

/// One engine's raw result list, tagged with its registered id.
#[derive(Debug, Clone)]
pub struct EngineResults {
    pub engine_id: String,
    pub nodes: Vec<RetrievedNode>,
}

impl EngineResults {
    pub fn new(engine_id: impl Into<String>, nodes: Vec<RetrievedNode>) -> Self {
        Self {
            engine_id: engine_id.into(),
            nodes,
        }
    }
}

/// Normalize each engine's list, weight it, merge by chunk id, and rank.
///
/// `results` must be in registration order: the first engine to return a
/// chunk becomes its `engine_source`, and contributions are listed in that order.
pub fn fuse(
    results: Vec<EngineResults>,
    weights: &EngineWeights,
    default_weight: f64,
) -> Vec<RetrievedNode> {
    let mut merged: HashMap<String, RetrievedNode> = HashMap::new();

    for EngineResults { engine_id, nodes } in results {
        let total = nodes.len();
        let nodes: Vec<RetrievedNode> =
            nodes.into_iter().filter(|n| n.score.is_finite()).collect();
        if nodes.len() < total {
            events::non_finite_scores_dropped(&engine_id, total - nodes.len());
        }
        if nodes.is_empty() {
            continue;
        }

        let weight = weights.weight_or(&engine_id, default_weight);
        let raw: Vec<f64> = nodes.iter().map(|n| n.score).collect();
        let normalized = min_max_normalize(&raw);

        let scored = nodes.into_iter().zip(raw).zip(normalized);
        for ((mut node, raw_score), normalized_score) in scored {
            let contribution = ScoreContribution {
                engine_id: engine_id.clone(),
                raw_score,
                normalized_score,
                weight,
            };
            let weighted = contribution.weighted_score();

            match merged.get_mut(&node.chunk.chunk_id) {
                Some(existing) => {
                    existing.score += weighted;
                    existing.contributions.push(contribution);
                }
                None => {
                    node.score = weighted;
                    node.engine_source = engine_id.clone();
                    node.contributions = vec![contribution];
                    merged.insert(node.chunk.chunk_id.clone(), node);
                }
            }
        }
    }

    rank(merged.into_values().collect())
}

/// Sort by descending score, ties broken by ascending chunk id.
pub fn rank(mut nodes: Vec<RetrievedNode>) -> Vec<RetrievedNode> {
    nodes.sort_by(compare_ranked);
    nodes
}

fn compare_ranked(a: &RetrievedNode, b: &RetrievedNode) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.chunk.chunk_id.cmp(&b.chunk.chunk_id))
}
