//! Multi-hop graph retrieval.
//!
//! Chunks are nodes; two chunks are linked when their term sets overlap
//! (Jaccard ≥ [`MIN_EDGE_WEIGHT`]). Chunks that cover the query directly are
//! seeds. Seed scores flow breadth-first along edges for up to [`MAX_HOPS`],
//! multiplied by each edge weight and by [`HOP_DECAY`] per hop. A chunk keeps
//! the best score any path gives it.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use sage_core::constants::ENGINE_GRAPH;
use sage_core::errors::SageResult;
use sage_core::models::{QueryContext, RetrievedNode};
use sage_core::traits::IRetrievalEngine;
use tracing::debug;

use super::corpus::{coverage, jaccard, query_terms, top_k_nodes, ChunkCorpus};

pub const MIN_EDGE_WEIGHT: f64 = 0.1;
pub const MAX_HOPS: usize = 2;
pub const HOP_DECAY: f64 = 0.5;

pub struct GraphEngine {
    corpus: ChunkCorpus,
    top_k: usize,
    /// Node weight is the index into `corpus.entries()`.
    graph: UnGraph<usize, f64>,
}

impl GraphEngine {
    pub fn new(corpus: ChunkCorpus, top_k: usize) -> Self {
        let entries = corpus.entries();
        let mut graph = UnGraph::with_capacity(entries.len(), 0);
        let nodes: Vec<NodeIndex> = (0..entries.len()).map(|i| graph.add_node(i)).collect();

        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let weight = jaccard(&entries[i].terms, &entries[j].terms);
                if weight >= MIN_EDGE_WEIGHT {
                    graph.add_edge(nodes[i], nodes[j], weight);
                }
            }
        }

        Self {
            corpus,
            top_k,
            graph,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Propagate seed scores through the graph, restricted to `allowed` nodes.
    fn propagate(
        &self,
        seeds: &HashMap<NodeIndex, f64>,
        allowed: &HashSet<NodeIndex>,
    ) -> HashMap<NodeIndex, f64> {
        let mut best = seeds.clone();

        for (&seed, &seed_score) in seeds {
            let mut visited = HashSet::new();
            visited.insert(seed);
            let mut queue = VecDeque::new();
            queue.push_back((seed, 0usize, seed_score));

            while let Some((current, depth, strength)) = queue.pop_front() {
                if depth >= MAX_HOPS {
                    continue;
                }
                for edge in self.graph.edges(current) {
                    let neighbor = if edge.source() == current {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    if !allowed.contains(&neighbor) || !visited.insert(neighbor) {
                        continue;
                    }
                    let propagated = strength * edge.weight() * HOP_DECAY;
                    let slot = best.entry(neighbor).or_insert(0.0);
                    if propagated > *slot {
                        *slot = propagated;
                    }
                    queue.push_back((neighbor, depth + 1, propagated));
                }
            }
        }

        best
    }
}

impl IRetrievalEngine for GraphEngine {
    fn retrieve(&self, context: &QueryContext) -> SageResult<Vec<RetrievedNode>> {
        let query = query_terms(context);
        let entries = self.corpus.entries();

        let allowed: HashSet<NodeIndex> = self
            .corpus
            .matching(context)
            .map(|(i, _)| NodeIndex::new(i))
            .collect();
        let seeds: HashMap<NodeIndex, f64> = allowed
            .iter()
            .map(|&n| (n, coverage(&query, &entries[n.index()].terms)))
            .filter(|(_, score)| *score > 0.0)
            .collect();

        let scores = self.propagate(&seeds, &allowed);
        let nodes = top_k_nodes(
            scores
                .into_iter()
                .map(|(n, score)| (score, &entries[n.index()].chunk)),
            self.top_k,
            ENGINE_GRAPH,
        );
        debug!(
            seeds = seeds.len(),
            edges = self.graph.edge_count(),
            results = nodes.len(),
            "graph retrieval"
        );
        Ok(nodes)
    }
}
