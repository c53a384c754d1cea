//! Token-level exact matching: a chunk scores the fraction of query terms it contains.

use sage_core::constants::ENGINE_EXACT;
use sage_core::errors::SageResult;
use sage_core::models::{QueryContext, RetrievedNode};
use sage_core::traits::IRetrievalEngine;
use tracing::debug;

use super::corpus::{coverage, query_terms, top_k_nodes, ChunkCorpus};

pub struct ExactMatchEngine {
    corpus: ChunkCorpus,
    top_k: usize,
}

impl ExactMatchEngine {
    pub fn new(corpus: ChunkCorpus, top_k: usize) -> Self {
        Self { corpus, top_k }
    }
}

impl IRetrievalEngine for ExactMatchEngine {
    fn retrieve(&self, context: &QueryContext) -> SageResult<Vec<RetrievedNode>> {
        let query = query_terms(context);
        let scored = self
            .corpus
            .matching(context)
            .map(|(_, entry)| (coverage(&query, &entry.terms), &entry.chunk));
        let nodes = top_k_nodes(scored, self.top_k, ENGINE_EXACT);
        debug!(terms = query.len(), results = nodes.len(), "exact-match retrieval");
        Ok(nodes)
    }
}
