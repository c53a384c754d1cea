use serde::{Deserialize, Serialize};

use super::defaults;

/// Process-level settings for the worker binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Async runtime worker threads.
    pub max_workers: usize,
    /// JSON array of pre-chunked passages served by the built-in engines.
    pub corpus_path: Option<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_workers: defaults::default_max_workers(),
            corpus_path: None,
        }
    }
}
