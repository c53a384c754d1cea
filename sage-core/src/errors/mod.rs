//! Error types. Each subsystem has its own enum; [`SageError`] aggregates them.

mod config_error;
mod retrieval_error;

pub use config_error::ConfigError;
pub use retrieval_error::RetrievalError;

/// Top-level error for the Sage workspace.
#[derive(Debug, thiserror::Error)]
pub enum SageError {
    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("runtime error: {reason}")]
    Runtime { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type SageResult<T> = Result<T, SageError>;
