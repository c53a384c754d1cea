use serde::{Deserialize, Serialize};

use super::defaults;

/// Fusion orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Deadline for an engine call unless its registration overrides it.
    pub engine_timeout_ms: u64,
    /// Weight for engines missing from the resolved weight vector.
    pub default_engine_weight: f64,
    /// Keep only the top N fused candidates. `None` keeps everything.
    pub max_results: Option<usize>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            engine_timeout_ms: defaults::DEFAULT_ENGINE_TIMEOUT_MS,
            default_engine_weight: defaults::DEFAULT_ENGINE_WEIGHT,
            max_results: None,
        }
    }
}
