//! SageRuntime: owns the orchestrator and observability state for one process.
//!
//! Built once at startup from a validated [`SageConfig`] and passed by
//! reference to whatever serves queries.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use sage_core::config::SageConfig;
use sage_core::errors::{SageError, SageResult};
use sage_core::models::{FusionReport, QueryContext};
use sage_observability::ObservabilityEngine;
use sage_retrieval::engines::{build_engine, ChunkCorpus};
use sage_retrieval::{EngineRegistry, FusionRetriever, RouteOperator};
use tracing::{info, Instrument};

pub struct SageRuntime {
    pub retriever: FusionRetriever,
    pub observability: Mutex<ObservabilityEngine>,
    pub config: SageConfig,
}

impl SageRuntime {
    pub fn new(config: SageConfig) -> SageResult<Self> {
        config.validate()?;

        let corpus = match &config.worker.corpus_path {
            Some(path) => ChunkCorpus::load(path)?,
            None => ChunkCorpus::default(),
        };
        Self::with_corpus(config, corpus)
    }

    /// Build over an already-loaded corpus.
    pub fn with_corpus(config: SageConfig, corpus: ChunkCorpus) -> SageResult<Self> {
        let mut registry = EngineRegistry::new();
        for registration in config.enabled_engines() {
            let engine = build_engine(registration.kind, &corpus, registration.top_k);
            let timeout = registration.timeout_ms.map(Duration::from_millis);
            registry.register_with_timeout(registration.id.clone(), engine, timeout)?;
        }

        let operator = RouteOperator::from_config(&config.routing)?;
        let retriever = FusionRetriever::new(registry)
            .with_route_operator(operator)
            .with_config(config.fusion.clone());

        info!(
            version = sage_core::constants::VERSION,
            engines = retriever.registry().len(),
            chunks = corpus.len(),
            "sage runtime initialized"
        );

        Ok(Self {
            retriever,
            observability: Mutex::new(ObservabilityEngine::new()),
            config,
        })
    }

    /// Run one fusion query and record it.
    pub async fn query(&self, context: &mut QueryContext) -> SageResult<FusionReport> {
        let span = sage_observability::query_span!(context.original_query);
        let report = self
            .retriever
            .retrieve_concurrent(context)
            .instrument(span)
            .await?;

        self.lock_observability()?
            .ingest(&context.original_query, &report);
        Ok(report)
    }

    /// Engines whose most recent call failed.
    pub fn degraded_engines(&self) -> SageResult<Vec<String>> {
        Ok(self.lock_observability()?.degraded_engines())
    }

    fn lock_observability(&self) -> SageResult<MutexGuard<'_, ObservabilityEngine>> {
        self.observability.lock().map_err(|_| SageError::Runtime {
            reason: "observability lock poisoned".into(),
        })
    }
}
