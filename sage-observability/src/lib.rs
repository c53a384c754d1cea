//! # sage-observability
//!
//! Structured logging for the fusion pipeline: subscriber setup, span and
//! event helpers, per-engine degradation tracking, and a bounded query log.

pub mod degradation;
pub mod engine;
pub mod query_log;
pub mod tracing_setup;

pub use degradation::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use engine::ObservabilityEngine;
pub use query_log::{QueryLog, QueryLogEntry};
