/// Sage system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Weight applied to an engine that has no entry in the resolved weight vector.
pub const DEFAULT_ENGINE_WEIGHT: f64 = 0.33;

/// Per-engine deadline when neither the registration nor the fusion config sets one.
pub const DEFAULT_ENGINE_TIMEOUT_MS: u64 = 5_000;

/// Maximum candidates a built-in engine returns per call.
pub const DEFAULT_ENGINE_TOP_K: usize = 10;

/// Normalized score given to every candidate of an engine whose raw scores are all equal.
pub const FLAT_NORMALIZED_SCORE: f64 = 1.0;

/// Engine identifiers of the reference deployment.
pub const ENGINE_GRAPH: &str = "graph";
pub const ENGINE_TREE: &str = "tree";
pub const ENGINE_EXACT: &str = "exact";
