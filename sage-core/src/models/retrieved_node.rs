use serde::{Deserialize, Serialize};

use super::chunk::Chunk;

/// How one engine contributed to a fused candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub engine_id: String,
    /// Score as returned by the engine.
    pub raw_score: f64,
    /// Min-max normalized within that engine's result list, in [0, 1].
    pub normalized_score: f64,
    /// Weight resolved for the engine under the request's intent.
    pub weight: f64,
}

impl ScoreContribution {
    pub fn weighted_score(&self) -> f64 {
        self.normalized_score * self.weight
    }
}

/// A scored reference to a chunk.
///
/// Engines produce these with their own score scale. After fusion, `score` is
/// the fused score and `contributions` lists every engine that returned the chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedNode {
    pub chunk: Chunk,
    pub score: f64,
    /// Registered id of the engine that produced the node. For fused nodes,
    /// the first contributing engine in registration order.
    pub engine_source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<ScoreContribution>,
}

impl RetrievedNode {
    pub fn new(chunk: Chunk, score: f64, engine_source: impl Into<String>) -> Self {
        Self {
            chunk,
            score,
            engine_source: engine_source.into(),
            contributions: Vec::new(),
        }
    }

    pub fn chunk_id(&self) -> &str {
        &self.chunk.chunk_id
    }
}
