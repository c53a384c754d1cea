//! End-to-end orchestrator tests: intent resolution, concurrent fan-out,
//! fault isolation, and the blocking adapter.

use std::collections::BTreeMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use sage_core::config::FusionConfig;
use sage_core::errors::SageError;
use sage_core::intent::Intent;
use sage_core::models::{EngineFailure, EngineStatus, EngineWeights, QueryContext};
use sage_core::traits::IIntentClassifier;
use sage_retrieval::{EngineRegistry, FusionRetriever, RouteOperator};
use test_fixtures::{FailingEngine, PanickingEngine, SlowEngine, StaticEngine};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Engines `a` and `b` with the two-engine summary routing row.
fn two_engine_retriever() -> FusionRetriever {
    let registry = EngineRegistry::new()
        .with_engine(
            "a",
            Arc::new(StaticEngine::scored(&[("chunk-1", 0.9), ("chunk-2", 0.1)])),
        )
        .and_then(|r| {
            r.with_engine(
                "b",
                Arc::new(StaticEngine::scored(&[("chunk-2", 0.8), ("chunk-1", 0.2)])),
            )
        })
        .unwrap();

    let mut table = BTreeMap::new();
    table.insert(
        Intent::Summary,
        EngineWeights::from_pairs(&[("a", 0.20), ("b", 0.70)]),
    );
    table.insert(
        Intent::General,
        EngineWeights::from_pairs(&[("a", 0.5), ("b", 0.5)]),
    );
    FusionRetriever::new(registry).with_route_operator(RouteOperator::from_table(table))
}

fn ids(nodes: &[sage_core::models::RetrievedNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.chunk_id()).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn summary_query_ranks_by_intent_weights() {
    let retriever = two_engine_retriever();
    let mut ctx = QueryContext::new("Can you summarize this book?");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(ctx.intent, Some(Intent::Summary));
    assert_eq!(report.intent, Intent::Summary);
    assert_eq!(ids(&report.nodes), ["chunk-2", "chunk-1"]);
    assert_close(report.nodes[0].score, 0.70);
    assert_close(report.nodes[1].score, 0.20);
    assert_eq!(report.nodes[0].engine_source, "a");
    assert_eq!(report.nodes[0].contributions.len(), 2);
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.failed_engines().count(), 0);
}

#[tokio::test]
async fn preset_intent_is_not_reclassified() {
    let retriever = two_engine_retriever();
    let mut ctx = QueryContext::new("Can you summarize this book?").with_intent(Intent::General);

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(ctx.intent, Some(Intent::General));
    assert_eq!(report.intent, Intent::General);
    // Equal weights: both chunks end at 0.5; the tie goes to the smaller id.
    assert_eq!(ids(&report.nodes), ["chunk-1", "chunk-2"]);
    assert_close(report.nodes[0].score, 0.5);
}

#[tokio::test]
async fn unweighted_engine_gets_default_weight() {
    let registry = EngineRegistry::new()
        .with_engine("custom", Arc::new(StaticEngine::scored(&[("x", 4.0)])))
        .unwrap();
    let retriever = FusionRetriever::new(registry);
    let mut ctx = QueryContext::new("hello there");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(report.intent, Intent::General);
    assert_close(report.nodes[0].score, 0.33);
}

#[tokio::test]
async fn no_engines_yields_empty_result() {
    let retriever = FusionRetriever::new(EngineRegistry::new());
    let mut ctx = QueryContext::new("what is spice");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert!(report.nodes.is_empty());
    assert!(report.outcomes.is_empty());
    assert_eq!(ctx.intent, Some(Intent::Definition));
}

#[tokio::test]
async fn invalid_query_is_rejected_before_any_engine_runs() {
    let engine = StaticEngine::scored(&[("x", 1.0)]);
    let calls = engine.call_counter();
    let registry = EngineRegistry::new()
        .with_engine("only", Arc::new(engine))
        .unwrap();
    let retriever = FusionRetriever::new(registry);

    let mut ctx = QueryContext::new("   ");
    let err = retriever.retrieve_concurrent(&mut ctx).await.unwrap_err();

    assert!(matches!(err, SageError::InvalidQuery { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(ctx.intent, None);
}

#[tokio::test]
async fn max_results_truncates_after_ranking() {
    let retriever = two_engine_retriever().with_config(FusionConfig {
        max_results: Some(1),
        ..FusionConfig::default()
    });
    let mut ctx = QueryContext::new("Can you summarize this book?");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(ids(&report.nodes), ["chunk-2"]);
}

#[tokio::test]
async fn every_engine_sees_the_same_context() {
    let a = StaticEngine::scored(&[("x", 1.0)]);
    let b = StaticEngine::scored(&[("y", 1.0)]);
    let (calls_a, calls_b) = (a.call_counter(), b.call_counter());
    let registry = EngineRegistry::new()
        .with_engine("a", Arc::new(a))
        .and_then(|r| r.with_engine("b", Arc::new(b)))
        .unwrap();
    let retriever = FusionRetriever::new(registry);

    let mut ctx = QueryContext::new("compare x vs y").with_sub_queries(vec!["x".into()]);
    retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(calls_a.load(Ordering::SeqCst), 1);
    assert_eq!(calls_b.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.intent, Some(Intent::Comparison));
}

struct AlwaysRelationship;

impl IIntentClassifier for AlwaysRelationship {
    fn classify(&self, _query: &str) -> Intent {
        Intent::Relationship
    }

    fn name(&self) -> &str {
        "always-relationship"
    }
}

#[tokio::test]
async fn classifier_is_swappable() {
    let retriever = two_engine_retriever().with_classifier(Arc::new(AlwaysRelationship));
    let mut ctx = QueryContext::new("Can you summarize this book?");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(ctx.intent, Some(Intent::Relationship));
    // No relationship row in the table: falls back to the general row.
    assert_eq!(report.weights.get("a"), Some(0.5));
}

/// Counts how often the orchestrator consults it.
#[derive(Default)]
struct CountingClassifier {
    classify_calls: std::sync::atomic::AtomicUsize,
    name_calls: std::sync::atomic::AtomicUsize,
}

impl IIntentClassifier for CountingClassifier {
    fn classify(&self, _query: &str) -> Intent {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        Intent::Comparison
    }

    fn name(&self) -> &str {
        self.name_calls.fetch_add(1, Ordering::SeqCst);
        "counting"
    }
}

#[tokio::test]
async fn classifier_is_consulted_only_when_intent_is_unset() {
    let classifier = Arc::new(CountingClassifier::default());
    let retriever = two_engine_retriever().with_classifier(classifier.clone());

    let mut preset = QueryContext::new("anything").with_intent(Intent::Summary);
    retriever.retrieve_concurrent(&mut preset).await.unwrap();
    assert_eq!(classifier.classify_calls.load(Ordering::SeqCst), 0);
    assert_eq!(classifier.name_calls.load(Ordering::SeqCst), 0);

    let mut unset = QueryContext::new("anything");
    retriever.retrieve_concurrent(&mut unset).await.unwrap();
    assert_eq!(unset.intent, Some(Intent::Comparison));
    assert_eq!(classifier.classify_calls.load(Ordering::SeqCst), 1);
    assert_eq!(classifier.name_calls.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Fault isolation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_engine_is_omitted_and_reported() {
    let registry = EngineRegistry::new()
        .with_engine("broken", Arc::new(FailingEngine::new("index offline")))
        .and_then(|r| r.with_engine("ok", Arc::new(StaticEngine::scored(&[("c", 2.0)]))))
        .unwrap();
    let retriever = FusionRetriever::new(registry);
    let mut ctx = QueryContext::new("tell me something");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(ids(&report.nodes), ["c"]);
    assert_eq!(report.nodes[0].engine_source, "ok");
    let failed: Vec<_> = report.failed_engines().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].engine_id, "broken");
    match failed[0].failure() {
        Some(EngineFailure::Error { message }) => assert!(message.contains("index offline")),
        other => panic!("expected error failure, got {other:?}"),
    }
}

#[tokio::test]
async fn panicking_engine_does_not_abort_the_request() {
    let registry = EngineRegistry::new()
        .with_engine("boom", Arc::new(PanickingEngine))
        .and_then(|r| r.with_engine("ok", Arc::new(StaticEngine::scored(&[("c", 1.0)]))))
        .unwrap();
    let retriever = FusionRetriever::new(registry);
    let mut ctx = QueryContext::new("tell me something");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(ids(&report.nodes), ["c"]);
    match report.outcomes[0].failure() {
        Some(EngineFailure::Panicked { message }) => assert!(message.contains("exploded")),
        other => panic!("expected panic failure, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_engine_times_out_without_blocking_the_others() {
    let slow = SlowEngine::new(
        Duration::from_millis(500),
        StaticEngine::scored(&[("late", 1.0)]),
    );
    let mut registry = EngineRegistry::new();
    registry
        .register_with_timeout("slow", Arc::new(slow), Some(Duration::from_millis(50)))
        .unwrap();
    registry
        .register("fast", Arc::new(StaticEngine::scored(&[("early", 1.0)])))
        .unwrap();
    let retriever = FusionRetriever::new(registry);
    let mut ctx = QueryContext::new("anything");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(ids(&report.nodes), ["early"]);
    assert!(report.elapsed < Duration::from_millis(450));
    assert!(matches!(
        report.outcomes[0].status,
        EngineStatus::Failed(EngineFailure::TimedOut { timeout_ms: 50 })
    ));
    assert!(report.outcomes[1].is_success());
}

#[tokio::test]
async fn slow_engines_run_concurrently() {
    let mut registry = EngineRegistry::new();
    for id in ["graph", "tree", "exact"] {
        let engine = SlowEngine::new(
            Duration::from_millis(300),
            StaticEngine::scored(&[(id, 1.0)]),
        );
        registry.register(id, Arc::new(engine)).unwrap();
    }
    let retriever = FusionRetriever::new(registry);
    let mut ctx = QueryContext::new("anything");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert_eq!(report.succeeded_engines().count(), 3);
    assert_eq!(report.nodes.len(), 3);
    // Serial execution would need at least 900ms.
    assert!(
        report.elapsed < Duration::from_millis(750),
        "engines were serialized: {:?}",
        report.elapsed
    );
}

#[tokio::test]
async fn one_of_three_engines_failing_fuses_the_survivors() {
    let registry = EngineRegistry::new()
        .with_engine("graph", Arc::new(FailingEngine::new("graph store offline")))
        .and_then(|r| {
            r.with_engine(
                "tree",
                Arc::new(StaticEngine::scored(&[("t-1", 4.0), ("shared", 2.0)])),
            )
        })
        .and_then(|r| {
            r.with_engine(
                "exact",
                Arc::new(StaticEngine::scored(&[("shared", 0.5), ("e-1", 0.1)])),
            )
        })
        .unwrap();
    let retriever = FusionRetriever::new(registry);
    let mut ctx = QueryContext::new("What is recursion?");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    // Definition weights: graph 0.20, tree 0.10, exact 0.70.
    assert_eq!(report.intent, Intent::Definition);
    assert_eq!(ids(&report.nodes), ["shared", "t-1", "e-1"]);
    assert_close(report.nodes[0].score, 0.0 * 0.10 + 1.0 * 0.70);
    assert_close(report.nodes[1].score, 1.0 * 0.10);
    assert_close(report.nodes[2].score, 0.0);
    assert_eq!(report.nodes[0].engine_source, "tree");
    assert!(report
        .nodes
        .iter()
        .all(|n| n.contributions.iter().all(|c| c.engine_id != "graph")));

    let failed: Vec<&str> = report
        .failed_engines()
        .map(|o| o.engine_id.as_str())
        .collect();
    assert_eq!(failed, ["graph"]);
}

#[tokio::test]
async fn all_engines_failing_yields_empty_success() {
    let registry = EngineRegistry::new()
        .with_engine("one", Arc::new(FailingEngine::new("down")))
        .and_then(|r| r.with_engine("two", Arc::new(PanickingEngine)))
        .unwrap();
    let retriever = FusionRetriever::new(registry);
    let mut ctx = QueryContext::new("anything");

    let report = retriever.retrieve_concurrent(&mut ctx).await.unwrap();

    assert!(report.nodes.is_empty());
    assert_eq!(report.failed_engines().count(), 2);
}

// ---------------------------------------------------------------------------
// Blocking adapter
// ---------------------------------------------------------------------------

#[test]
fn blocking_retrieve_matches_concurrent_result() {
    let retriever = two_engine_retriever();
    let mut ctx = QueryContext::new("Can you summarize this book?");

    let nodes = retriever.retrieve(&mut ctx).unwrap();

    assert_eq!(ids(&nodes), ["chunk-2", "chunk-1"]);
    assert_eq!(ctx.intent, Some(Intent::Summary));
}

#[tokio::test]
async fn blocking_retrieve_inside_runtime_is_an_error() {
    let retriever = two_engine_retriever();
    let mut ctx = QueryContext::new("Can you summarize this book?");

    let err = retriever.retrieve(&mut ctx).unwrap_err();

    assert!(matches!(err, SageError::Runtime { .. }));
}
