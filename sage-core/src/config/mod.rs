//! Configuration. Every section defaults, so an empty TOML document is a
//! complete configuration for the reference deployment.

pub mod defaults;
mod engine_config;
mod fusion_config;
mod observability_config;
mod routing_config;
mod worker_config;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use engine_config::{EngineKind, EngineRegistration};
pub use fusion_config::FusionConfig;
pub use observability_config::ObservabilityConfig;
pub use routing_config::RoutingConfig;
pub use worker_config::WorkerConfig;

use crate::errors::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SageConfig {
    pub fusion: FusionConfig,
    pub routing: RoutingConfig,
    pub engines: Vec<EngineRegistration>,
    pub observability: ObservabilityConfig,
    pub worker: WorkerConfig,
}

impl Default for SageConfig {
    fn default() -> Self {
        Self {
            fusion: FusionConfig::default(),
            routing: RoutingConfig::default(),
            engines: engine_config::default_engines(),
            observability: ObservabilityConfig::default(),
            worker: WorkerConfig::default(),
        }
    }
}

impl SageConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: SageConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let default_weight = self.fusion.default_engine_weight;
        if !default_weight.is_finite() || default_weight < 0.0 {
            return Err(ConfigError::InvalidDefaultWeight {
                weight: default_weight,
            });
        }
        if self.fusion.engine_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout {
                scope: "fusion.engine_timeout_ms".into(),
            });
        }

        if self.worker.max_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        self.routing.resolve()?;

        let mut seen = HashSet::new();
        for engine in &self.engines {
            if engine.id.trim().is_empty() {
                return Err(ConfigError::EmptyEngineId);
            }
            if !seen.insert(engine.id.as_str()) {
                return Err(ConfigError::DuplicateEngine {
                    engine: engine.id.clone(),
                });
            }
            if engine.timeout_ms == Some(0) {
                return Err(ConfigError::ZeroTimeout {
                    scope: format!("engine '{}'", engine.id),
                });
            }
        }
        Ok(())
    }

    /// Registrations with `enabled = true`, in declaration order.
    pub fn enabled_engines(&self) -> impl Iterator<Item = &EngineRegistration> {
        self.engines.iter().filter(|e| e.enabled)
    }
}
