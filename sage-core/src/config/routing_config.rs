use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;
use crate::intent::Intent;
use crate::models::EngineWeights;

/// Intent → engine weight table, as written in TOML:
///
/// ```toml
/// [routing.weights.summary]
/// graph = 0.2
/// tree = 0.7
/// exact = 0.1
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        let weights = defaults::DEFAULT_ROUTING_TABLE
            .iter()
            .map(|(intent, entries)| {
                let row = entries.iter().map(|(id, w)| (id.to_string(), *w)).collect();
                (intent.to_string(), row)
            })
            .collect();
        Self { weights }
    }
}

impl RoutingConfig {
    /// The reference table overlaid with the configured rows.
    /// A configured row replaces the whole default row for that intent.
    pub fn resolve(&self) -> Result<BTreeMap<Intent, EngineWeights>, ConfigError> {
        let mut table: BTreeMap<Intent, EngineWeights> = RoutingConfig::default()
            .weights
            .into_iter()
            .filter_map(|(name, row)| {
                let intent = name.parse::<Intent>().ok()?;
                Some((intent, row.into_iter().collect()))
            })
            .collect();

        for (name, row) in &self.weights {
            let intent = name
                .parse::<Intent>()
                .map_err(|_| ConfigError::UnknownIntent { name: name.clone() })?;
            for (engine, weight) in row {
                if !weight.is_finite() || *weight < 0.0 {
                    return Err(ConfigError::InvalidWeight {
                        intent: name.clone(),
                        engine: engine.clone(),
                        weight: *weight,
                    });
                }
            }
            table.insert(intent, row.clone().into_iter().collect());
        }

        Ok(table)
    }
}
