//! FusionRetriever: resolves intent and weights, fans the query out to every
//! registered engine, waits for all of them, and fuses what came back.
//!
//! Each engine call runs on the blocking pool under its own deadline. A
//! failed, panicked, or timed-out engine is reported in the
//! [`FusionReport`] and left out of the merge; the call as a whole succeeds.

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sage_core::config::FusionConfig;
use sage_core::errors::{SageError, SageResult};
use sage_core::models::{
    EngineFailure, EngineOutcome, EngineStatus, FusionReport, QueryContext, RetrievedNode,
};
use sage_core::traits::IIntentClassifier;
use sage_observability::tracing_setup::events;
use tokio::task::JoinError;
use tracing::Instrument;
use uuid::Uuid;

use super::merge::{fuse, EngineResults};
use crate::intent::{KeywordIntentClassifier, RouteOperator};
use crate::registry::EngineRegistry;

/// Result of one engine call after the barrier.
struct SettledEngine {
    engine_id: String,
    elapsed: Duration,
    result: Result<Vec<RetrievedNode>, EngineFailure>,
}

/// The fusion orchestrator. Built once at startup and shared by reference;
/// holds no per-request state.
pub struct FusionRetriever {
    registry: EngineRegistry,
    classifier: Arc<dyn IIntentClassifier>,
    operator: RouteOperator,
    config: FusionConfig,
}

impl FusionRetriever {
    /// Keyword classifier, reference weights, default fusion config.
    pub fn new(registry: EngineRegistry) -> Self {
        Self {
            registry,
            classifier: Arc::new(KeywordIntentClassifier::new()),
            operator: RouteOperator::default(),
            config: FusionConfig::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn IIntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_route_operator(mut self, operator: RouteOperator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_config(mut self, config: FusionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    pub fn route_operator(&self) -> &RouteOperator {
        &self.operator
    }

    /// Run the full pipeline. Writes the resolved intent into `context`
    /// when it was unset.
    pub async fn retrieve_concurrent(
        &self,
        context: &mut QueryContext,
    ) -> SageResult<FusionReport> {
        let started = Instant::now();
        context.validate()?;

        // Step 1: Resolve intent.
        let classifier = context.intent.is_none().then(|| self.classifier.name());
        let intent = match context.intent {
            Some(intent) => intent,
            None => {
                let intent = self.classifier.classify(&context.original_query);
                context.intent = Some(intent);
                intent
            }
        };

        // Step 2: Resolve weights.
        let weights = self.operator.get_weights(intent);
        let request_id = Uuid::new_v4();
        let span = sage_observability::fusion_span!(request_id, context.original_query, intent);

        async move {
            events::intent_resolved(intent, classifier, &weights);

            // Step 3: Fan out and wait for every engine.
            let settled = self.fan_out(Arc::new(context.clone())).await;

            // Step 4: Keep successes, record failures.
            let mut outcomes = Vec::with_capacity(settled.len());
            let mut results = Vec::with_capacity(settled.len());
            for SettledEngine {
                engine_id,
                elapsed,
                result,
            } in settled
            {
                let status = match result {
                    Ok(nodes) => {
                        events::engine_succeeded(&engine_id, nodes.len(), elapsed);
                        let status = EngineStatus::Succeeded {
                            candidates: nodes.len(),
                        };
                        results.push(EngineResults::new(engine_id.clone(), nodes));
                        status
                    }
                    Err(failure) => {
                        events::engine_failed(&engine_id, &failure, elapsed);
                        EngineStatus::Failed(failure)
                    }
                };
                outcomes.push(EngineOutcome {
                    engine_id,
                    elapsed,
                    status,
                });
            }

            // Step 5: Normalize, weight, merge, rank.
            let mut nodes = fuse(results, &weights, self.config.default_engine_weight);
            if let Some(limit) = self.config.max_results {
                nodes.truncate(limit);
            }

            let report = FusionReport {
                request_id,
                intent,
                weights,
                nodes,
                outcomes,
                elapsed: started.elapsed(),
            };
            events::fusion_completed(
                report.nodes.len(),
                report.succeeded_engines().count(),
                report.failed_engines().count(),
                report.elapsed,
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Blocking adapter over [`retrieve_concurrent`](Self::retrieve_concurrent)
    /// for callers outside an async runtime. Returns only the ranked nodes.
    pub fn retrieve(&self, context: &mut QueryContext) -> SageResult<Vec<RetrievedNode>> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(SageError::Runtime {
                reason: "blocking retrieve called inside an async runtime; \
                         await retrieve_concurrent instead"
                    .into(),
            });
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SageError::Runtime {
                reason: format!("failed to build fusion runtime: {e}"),
            })?;
        let report = runtime.block_on(self.retrieve_concurrent(context));
        // Timed-out engine calls may still be running on the blocking pool.
        runtime.shutdown_background();
        report.map(|r| r.nodes)
    }

    /// Spawn one task per engine, then await them all in registration order.
    async fn fan_out(&self, context: Arc<QueryContext>) -> Vec<SettledEngine> {
        let default_timeout = Duration::from_millis(self.config.engine_timeout_ms);

        let handles: Vec<_> = self
            .registry
            .iter()
            .map(|registered| {
                let engine = Arc::clone(&registered.engine);
                let context = Arc::clone(&context);
                let timeout = registered.timeout.unwrap_or(default_timeout);
                let span = sage_observability::engine_span!(registered.id);

                let handle = tokio::spawn(async move {
                    let started = Instant::now();
                    let call = tokio::task::spawn_blocking(move || {
                        let _entered = span.enter();
                        engine.retrieve(&context)
                    });
                    let result = match tokio::time::timeout(timeout, call).await {
                        Ok(Ok(Ok(nodes))) => Ok(nodes),
                        Ok(Ok(Err(err))) => Err(EngineFailure::Error {
                            message: err.to_string(),
                        }),
                        Ok(Err(join_err)) => Err(EngineFailure::Panicked {
                            message: join_error_message(join_err),
                        }),
                        Err(_) => Err(EngineFailure::timed_out(timeout)),
                    };
                    (started.elapsed(), result)
                });
                (registered.id.clone(), handle)
            })
            .collect();

        let mut settled = Vec::with_capacity(handles.len());
        for (engine_id, handle) in handles {
            let (elapsed, result) = match handle.await {
                Ok(pair) => pair,
                Err(join_err) => (
                    Duration::ZERO,
                    Err(EngineFailure::Panicked {
                        message: join_error_message(join_err),
                    }),
                ),
            };
            settled.push(SettledEngine {
                engine_id,
                elapsed,
                result,
            });
        }
        settled
    }
}

fn join_error_message(err: JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        err.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "engine panicked".to_string()
    }
}
