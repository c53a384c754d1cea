use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;

/// Which built-in engine implementation a registration uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Multi-hop reasoning over a term-sharing chunk graph.
    Graph,
    /// Hierarchical document → section → chunk summary scoring.
    Tree,
    /// Token-level exact matching.
    Exact,
}

/// One `[[engines]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineRegistration {
    /// Stable identifier used for weight lookup and candidate tagging.
    pub id: String,
    pub kind: EngineKind,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Overrides `fusion.engine_timeout_ms` for this engine.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl EngineRegistration {
    pub fn new(id: impl Into<String>, kind: EngineKind) -> Self {
        Self {
            id: id.into(),
            kind,
            enabled: true,
            timeout_ms: None,
            top_k: defaults::DEFAULT_ENGINE_TOP_K,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_top_k() -> usize {
    defaults::DEFAULT_ENGINE_TOP_K
}

pub(crate) fn default_engines() -> Vec<EngineRegistration> {
    vec![
        EngineRegistration::new(constants::ENGINE_GRAPH, EngineKind::Graph),
        EngineRegistration::new(constants::ENGINE_TREE, EngineKind::Tree),
        EngineRegistration::new(constants::ENGINE_EXACT, EngineKind::Exact),
    ]
}
