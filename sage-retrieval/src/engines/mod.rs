//! Built-in engines over an in-memory chunk corpus.
//!
//! Each one is a plain [`IRetrievalEngine`]; the orchestrator knows them only
//! through the id they are registered under.

pub mod corpus;
pub mod exact_match;
pub mod graph;
pub mod summary_tree;

use std::sync::Arc;

use sage_core::config::EngineKind;
use sage_core::traits::IRetrievalEngine;

pub use corpus::ChunkCorpus;
pub use exact_match::ExactMatchEngine;
pub use graph::GraphEngine;
pub use summary_tree::SummaryTreeEngine;

/// Construct the built-in engine for `kind` over `corpus`.
pub fn build_engine(
    kind: EngineKind,
    corpus: &ChunkCorpus,
    top_k: usize,
) -> Arc<dyn IRetrievalEngine> {
    match kind {
        EngineKind::Graph => Arc::new(GraphEngine::new(corpus.clone(), top_k)),
        EngineKind::Tree => Arc::new(SummaryTreeEngine::new(corpus.clone(), top_k)),
        EngineKind::Exact => Arc::new(ExactMatchEngine::new(corpus.clone(), top_k)),
    }
}
