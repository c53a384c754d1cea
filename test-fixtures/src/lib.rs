//! Shared fixtures for sage tests: JSON golden datasets, the sample corpus,
//! and scripted retrieval engines for exercising the orchestrator.

use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sage_core::errors::{RetrievalError, SageResult};
use sage_core::models::{Chunk, DocumentMetadata, QueryContext, RetrievedNode};
use sage_core::traits::IRetrievalEngine;

/// Root directory of the test-fixtures folder.
pub fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// The sample corpus used by engine and runtime tests.
pub const SAMPLE_CORPUS: &str = "corpus/sample_corpus.json";

pub fn sample_chunks() -> Vec<Chunk> {
    load_fixture(SAMPLE_CORPUS)
}

// ─── Builders ──────────────────────────────────────────────────────────────

pub fn make_chunk(id: &str, content: &str) -> Chunk {
    Chunk {
        chunk_id: id.to_string(),
        document_id: "doc-1".to_string(),
        content: content.to_string(),
        metadata: DocumentMetadata::new("book-1", "Test Book"),
    }
}

pub fn make_node(id: &str, score: f64) -> RetrievedNode {
    RetrievedNode::new(make_chunk(id, &format!("content of {id}")), score, "fixture")
}

// ─── Engine doubles ────────────────────────────────────────────────────────

/// Returns a fixed list of nodes and counts its calls.
#[derive(Default)]
pub struct StaticEngine {
    nodes: Vec<RetrievedNode>,
    calls: Arc<AtomicUsize>,
}

impl StaticEngine {
    pub fn new(nodes: Vec<RetrievedNode>) -> Self {
        Self {
            nodes,
            calls: Arc::default(),
        }
    }

    /// `(chunk_id, raw_score)` pairs.
    pub fn scored(pairs: &[(&str, f64)]) -> Self {
        Self::new(pairs.iter().map(|(id, s)| make_node(id, *s)).collect())
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl IRetrievalEngine for StaticEngine {
    fn retrieve(&self, _context: &QueryContext) -> SageResult<Vec<RetrievedNode>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.nodes.clone())
    }
}

/// Always returns an error.
pub struct FailingEngine {
    pub reason: String,
}

impl FailingEngine {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl IRetrievalEngine for FailingEngine {
    fn retrieve(&self, _context: &QueryContext) -> SageResult<Vec<RetrievedNode>> {
        Err(RetrievalError::EngineFailed {
            engine: "failing".to_string(),
            reason: self.reason.clone(),
        }
        .into())
    }
}

/// Sleeps before answering.
pub struct SlowEngine {
    pub delay: Duration,
    pub inner: StaticEngine,
}

impl SlowEngine {
    pub fn new(delay: Duration, inner: StaticEngine) -> Self {
        Self { delay, inner }
    }
}

impl IRetrievalEngine for SlowEngine {
    fn retrieve(&self, context: &QueryContext) -> SageResult<Vec<RetrievedNode>> {
        std::thread::sleep(self.delay);
        self.inner.retrieve(context)
    }
}

/// Panics on every call.
pub struct PanickingEngine;

impl IRetrievalEngine for PanickingEngine {
    fn retrieve(&self, _context: &QueryContext) -> SageResult<Vec<RetrievedNode>> {
        panic!("engine exploded");
    }
}
