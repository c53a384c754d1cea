//! Structured events emitted at fixed points of the pipeline.

use std::time::Duration;

use sage_core::models::{EngineFailure, EngineWeights};
use sage_core::Intent;

/// `classifier` is `None` when the caller preset the intent.
pub fn intent_resolved(intent: Intent, classifier: Option<&str>, weights: &EngineWeights) {
    tracing::info!(
        event = "intent_resolved",
        %intent,
        classified = classifier.is_some(),
        classifier = classifier.unwrap_or("preset"),
        weights = ?weights,
        "fusion intent resolved"
    );
}

pub fn engine_succeeded(engine_id: &str, candidates: usize, elapsed: Duration) {
    tracing::debug!(
        event = "engine_succeeded",
        engine = engine_id,
        candidates,
        elapsed_ms = millis(elapsed),
        "engine returned candidates"
    );
}

pub fn engine_failed(engine_id: &str, failure: &EngineFailure, elapsed: Duration) {
    tracing::warn!(
        event = "engine_failed",
        engine = engine_id,
        failure = failure.kind(),
        detail = ?failure,
        elapsed_ms = millis(elapsed),
        "engine omitted from fusion"
    );
}

pub fn non_finite_scores_dropped(engine_id: &str, dropped: usize) {
    tracing::warn!(
        event = "non_finite_scores_dropped",
        engine = engine_id,
        dropped,
        "discarded candidates with non-finite scores"
    );
}

pub fn fusion_completed(results: usize, succeeded: usize, failed: usize, elapsed: Duration) {
    tracing::info!(
        event = "fusion_completed",
        results,
        succeeded,
        failed,
        elapsed_ms = millis(elapsed),
        "fusion complete"
    );
}

pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component,
        failure,
        fallback,
        "component degraded"
    );
}

pub fn degradation_recovered(component: &str) {
    tracing::info!(event = "degradation_recovered", component, "component recovered");
}

pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
