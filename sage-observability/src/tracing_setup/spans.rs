//! Span definitions for the fusion pipeline.
//!
//! Each span carries the request's identifying fields via the `tracing` crate.

/// Create a fusion span (one per orchestrator call).
#[macro_export]
macro_rules! fusion_span {
    ($request_id:expr, $query:expr, $intent:expr) => {
        tracing::info_span!(
            "sage.fusion",
            request_id = %$request_id,
            query = %$query,
            intent = %$intent
        )
    };
}

/// Create an engine span (one per engine call within a fusion).
#[macro_export]
macro_rules! engine_span {
    ($engine_id:expr) => {
        tracing::debug_span!("sage.engine", engine = %$engine_id)
    };
}

/// Create a worker query span.
#[macro_export]
macro_rules! query_span {
    ($query:expr) => {
        tracing::info_span!("sage.query", query = %$query)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const FUSION: &str = "sage.fusion";
    pub const ENGINE: &str = "sage.engine";
    pub const QUERY: &str = "sage.query";
}
