use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::engine_weights::EngineWeights;
use super::retrieved_node::RetrievedNode;
use crate::errors::RetrievalError;
use crate::intent::Intent;

/// Why an engine contributed nothing to a fusion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineFailure {
    /// The engine returned an error.
    Error { message: String },
    /// The engine did not answer within its deadline.
    TimedOut { timeout_ms: u64 },
    /// The engine call panicked.
    Panicked { message: String },
}

impl EngineFailure {
    /// Timeout failure for `timeout`, saturating at `u64::MAX` milliseconds.
    pub fn timed_out(timeout: Duration) -> Self {
        EngineFailure::TimedOut {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EngineFailure::Error { .. } => "error",
            EngineFailure::TimedOut { .. } => "timed_out",
            EngineFailure::Panicked { .. } => "panicked",
        }
    }

    pub fn into_error(self, engine: &str) -> RetrievalError {
        let engine = engine.to_string();
        match self {
            EngineFailure::Error { message } => RetrievalError::EngineFailed {
                engine,
                reason: message,
            },
            EngineFailure::TimedOut { timeout_ms } => {
                RetrievalError::EngineTimedOut { engine, timeout_ms }
            }
            EngineFailure::Panicked { message } => RetrievalError::EnginePanicked {
                engine,
                reason: message,
            },
        }
    }
}

/// Result status of one engine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EngineStatus {
    Succeeded { candidates: usize },
    Failed(EngineFailure),
}

/// Per-engine diagnostics for one fusion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutcome {
    pub engine_id: String,
    pub elapsed: Duration,
    pub status: EngineStatus,
}

impl EngineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, EngineStatus::Succeeded { .. })
    }

    pub fn failure(&self) -> Option<&EngineFailure> {
        match &self.status {
            EngineStatus::Failed(failure) => Some(failure),
            EngineStatus::Succeeded { .. } => None,
        }
    }
}

/// Everything a fusion call produced: the ranking and how it was reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionReport {
    pub request_id: Uuid,
    pub intent: Intent,
    pub weights: EngineWeights,
    /// Ranked by descending fused score, ties by ascending chunk id.
    pub nodes: Vec<RetrievedNode>,
    /// One entry per registered engine, in registration order.
    pub outcomes: Vec<EngineOutcome>,
    pub elapsed: Duration,
}

impl FusionReport {
    pub fn failed_engines(&self) -> impl Iterator<Item = &EngineOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn succeeded_engines(&self) -> impl Iterator<Item = &EngineOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }
}
