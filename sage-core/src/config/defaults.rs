//! Default values for every config field.

use crate::constants;

pub const DEFAULT_ENGINE_TIMEOUT_MS: u64 = constants::DEFAULT_ENGINE_TIMEOUT_MS;
pub const DEFAULT_ENGINE_WEIGHT: f64 = constants::DEFAULT_ENGINE_WEIGHT;
pub const DEFAULT_ENGINE_TOP_K: usize = constants::DEFAULT_ENGINE_TOP_K;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Reference weight table: (intent, [(engine id, weight)]).
pub const DEFAULT_ROUTING_TABLE: [(&str, [(&str, f64); 3]); 5] = [
    (
        "summary",
        [
            (constants::ENGINE_GRAPH, 0.20),
            (constants::ENGINE_TREE, 0.70),
            (constants::ENGINE_EXACT, 0.10),
        ],
    ),
    (
        "definition",
        [
            (constants::ENGINE_GRAPH, 0.20),
            (constants::ENGINE_TREE, 0.10),
            (constants::ENGINE_EXACT, 0.70),
        ],
    ),
    (
        "relationship",
        [
            (constants::ENGINE_GRAPH, 0.70),
            (constants::ENGINE_TREE, 0.10),
            (constants::ENGINE_EXACT, 0.20),
        ],
    ),
    (
        "comparison",
        [
            (constants::ENGINE_GRAPH, 0.40),
            (constants::ENGINE_TREE, 0.40),
            (constants::ENGINE_EXACT, 0.20),
        ],
    ),
    (
        "general",
        [
            (constants::ENGINE_GRAPH, 0.34),
            (constants::ENGINE_TREE, 0.33),
            (constants::ENGINE_EXACT, 0.33),
        ],
    ),
];

pub fn default_max_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
