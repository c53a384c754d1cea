/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("engine '{engine}' failed: {reason}")]
    EngineFailed { engine: String, reason: String },

    #[error("engine '{engine}' timed out after {timeout_ms}ms")]
    EngineTimedOut { engine: String, timeout_ms: u64 },

    #[error("engine '{engine}' panicked: {reason}")]
    EnginePanicked { engine: String, reason: String },

    #[error("engine id must be non-empty")]
    EmptyEngineId,

    #[error("engine '{engine}' is already registered")]
    DuplicateEngine { engine: String },

    #[error("corpus could not be loaded from {path}: {reason}")]
    CorpusUnavailable { path: String, reason: String },
}
