//! Engine registry: each engine instance is stored with an explicit id and deadline.

use std::sync::Arc;
use std::time::Duration;

use sage_core::errors::{RetrievalError, SageResult};
use sage_core::traits::IRetrievalEngine;

/// An engine plus the identity it is registered under.
#[derive(Clone)]
pub struct RegisteredEngine {
    pub id: String,
    pub engine: Arc<dyn IRetrievalEngine>,
    /// Overrides the orchestrator's default deadline when set.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for RegisteredEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredEngine")
            .field("id", &self.id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Ordered set of engines. Registration order is the order used for
/// merging, provenance, and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct EngineRegistry {
    engines: Vec<RegisteredEngine>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `engine` under `id`. Ids must be non-empty and unique.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        engine: Arc<dyn IRetrievalEngine>,
    ) -> SageResult<()> {
        self.register_with_timeout(id, engine, None)
    }

    pub fn register_with_timeout(
        &mut self,
        id: impl Into<String>,
        engine: Arc<dyn IRetrievalEngine>,
        timeout: Option<Duration>,
    ) -> SageResult<()> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RetrievalError::EmptyEngineId.into());
        }
        if self.contains(&id) {
            return Err(RetrievalError::DuplicateEngine { engine: id }.into());
        }
        self.engines.push(RegisteredEngine {
            id,
            engine,
            timeout,
        });
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_engine(
        mut self,
        id: impl Into<String>,
        engine: Arc<dyn IRetrievalEngine>,
    ) -> SageResult<Self> {
        self.register(id, engine)?;
        Ok(self)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.engines.iter().any(|e| e.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.engines.iter().map(|e| e.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredEngine> {
        self.engines.iter()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
