//! Hierarchical summary retrieval.
//!
//! The corpus is viewed as a tree: document → section (`toc_path`) → chunk.
//! Each level's term set is the union of its children. A chunk scores a blend
//! of how well its document, its section, and itself cover the query, so
//! chunks inside broadly relevant sections surface even without a direct hit.

use std::collections::{HashMap, HashSet};

use sage_core::constants::ENGINE_TREE;
use sage_core::errors::SageResult;
use sage_core::models::{Chunk, QueryContext, RetrievedNode};
use sage_core::traits::IRetrievalEngine;
use tracing::debug;

use super::corpus::{coverage, query_terms, top_k_nodes, ChunkCorpus};

const DOCUMENT_WEIGHT: f64 = 0.5;
const SECTION_WEIGHT: f64 = 0.3;
const CHUNK_WEIGHT: f64 = 0.2;

type SectionKey = (String, String);

pub struct SummaryTreeEngine {
    corpus: ChunkCorpus,
    top_k: usize,
    documents: HashMap<String, HashSet<String>>,
    sections: HashMap<SectionKey, HashSet<String>>,
}

impl SummaryTreeEngine {
    pub fn new(corpus: ChunkCorpus, top_k: usize) -> Self {
        let mut documents: HashMap<String, HashSet<String>> = HashMap::new();
        let mut sections: HashMap<SectionKey, HashSet<String>> = HashMap::new();

        for entry in corpus.entries() {
            documents
                .entry(entry.chunk.document_id.clone())
                .or_default()
                .extend(entry.terms.iter().cloned());
            sections
                .entry(section_key(&entry.chunk))
                .or_default()
                .extend(entry.terms.iter().cloned());
        }

        Self {
            corpus,
            top_k,
            documents,
            sections,
        }
    }

    fn level_coverage<K>(
        levels: &HashMap<K, HashSet<String>>,
        key: &K,
        query: &HashSet<String>,
    ) -> f64
    where
        K: std::hash::Hash + Eq,
    {
        levels.get(key).map_or(0.0, |terms| coverage(query, terms))
    }
}

fn section_key(chunk: &Chunk) -> SectionKey {
    (
        chunk.document_id.clone(),
        chunk.metadata.toc_path.clone().unwrap_or_default(),
    )
}

impl IRetrievalEngine for SummaryTreeEngine {
    fn retrieve(&self, context: &QueryContext) -> SageResult<Vec<RetrievedNode>> {
        let query = query_terms(context);
        let scored = self.corpus.matching(context).map(|(_, entry)| {
            let chunk = &entry.chunk;
            let document = Self::level_coverage(&self.documents, &chunk.document_id, &query);
            let section = Self::level_coverage(&self.sections, &section_key(chunk), &query);
            let own = coverage(&query, &entry.terms);
            let score =
                DOCUMENT_WEIGHT * document + SECTION_WEIGHT * section + CHUNK_WEIGHT * own;
            (score, chunk)
        });
        let nodes = top_k_nodes(scored, self.top_k, ENGINE_TREE);
        debug!(
            documents = self.documents.len(),
            sections = self.sections.len(),
            results = nodes.len(),
            "summary-tree retrieval"
        );
        Ok(nodes)
    }
}
