//! Shared read-only chunk corpus and the term helpers the built-in engines use.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use sage_core::errors::{RetrievalError, SageResult};
use sage_core::models::{Chunk, QueryContext, RetrievedNode};

/// A chunk with its precomputed term set.
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    pub chunk: Chunk,
    pub terms: HashSet<String>,
}

/// Immutable collection of chunks, cheap to clone and share across engines.
#[derive(Debug, Clone, Default)]
pub struct ChunkCorpus {
    entries: Arc<Vec<CorpusEntry>>,
}

impl ChunkCorpus {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        let entries = chunks
            .into_iter()
            .map(|chunk| {
                let terms = tokenize(&chunk.content).collect();
                CorpusEntry { chunk, terms }
            })
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Parse a JSON array of chunks.
    pub fn from_json(input: &str) -> SageResult<Self> {
        let chunks: Vec<Chunk> = serde_json::from_str(input)?;
        Ok(Self::new(chunks))
    }

    /// Load a JSON array of chunks from disk.
    pub fn load(path: impl AsRef<Path>) -> SageResult<Self> {
        let path = path.as_ref();
        let unavailable = |reason: String| RetrievalError::CorpusUnavailable {
            path: path.display().to_string(),
            reason,
        };
        let input = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let chunks: Vec<Chunk> =
            serde_json::from_str(&input).map_err(|e| unavailable(e.to_string()))?;
        Ok(Self::new(chunks))
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries (with their index) whose metadata satisfies the context's filters.
    pub fn matching<'a>(
        &'a self,
        context: &'a QueryContext,
    ) -> impl Iterator<Item = (usize, &'a CorpusEntry)> + 'a {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.chunk.matches_filters(&context.metadata_filters))
    }
}

/// Lowercase alphanumeric tokens of at least two characters.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
}

/// Terms of the original query and every sub-query.
pub fn query_terms(context: &QueryContext) -> HashSet<String> {
    context.all_queries().flat_map(tokenize).collect()
}

/// Fraction of `query` terms present in `terms`, in [0, 1].
pub fn coverage(query: &HashSet<String>, terms: &HashSet<String>) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    let hits = query.iter().filter(|t| terms.contains(*t)).count();
    hits as f64 / query.len() as f64
}

/// Jaccard similarity of two term sets.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Keep positive scores, order by descending score then chunk id, take `top_k`.
pub fn top_k_nodes<'a>(
    scored: impl IntoIterator<Item = (f64, &'a Chunk)>,
    top_k: usize,
    engine_source: &str,
) -> Vec<RetrievedNode> {
    let mut scored: Vec<(f64, &Chunk)> =
        scored.into_iter().filter(|(s, _)| *s > 0.0).collect();
    scored.sort_by(|(sa, a), (sb, b)| {
        sb.total_cmp(sa)
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });
    scored
        .into_iter()
        .take(top_k)
        .map(|(score, chunk)| RetrievedNode::new(chunk.clone(), score, engine_source))
        .collect()
}
