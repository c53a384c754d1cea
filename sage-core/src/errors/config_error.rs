/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown intent '{name}' in routing table")]
    UnknownIntent { name: String },

    #[error("invalid weight {weight} for engine '{engine}' under intent '{intent}'")]
    InvalidWeight {
        intent: String,
        engine: String,
        weight: f64,
    },

    #[error("invalid default engine weight {weight}")]
    InvalidDefaultWeight { weight: f64 },

    #[error("engine id must be non-empty")]
    EmptyEngineId,

    #[error("engine '{engine}' is configured more than once")]
    DuplicateEngine { engine: String },

    #[error("timeout for {scope} must be greater than zero")]
    ZeroTimeout { scope: String },

    #[error("worker.max_workers must be greater than zero")]
    ZeroWorkers,

    #[error("invalid value '{value}' for environment variable {name}")]
    InvalidEnv { name: String, value: String },
}
