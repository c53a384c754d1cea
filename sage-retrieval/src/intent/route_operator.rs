//! Intent → engine weight vector.
//!
//! The table is data: the reference weights are the defaults and the
//! `[routing]` config section overrides them per intent.

use std::collections::BTreeMap;

use sage_core::config::RoutingConfig;
use sage_core::errors::SageResult;
use sage_core::models::EngineWeights;
use sage_core::Intent;

/// Pure lookup from intent to per-engine weights.
#[derive(Debug, Clone)]
pub struct RouteOperator {
    table: BTreeMap<Intent, EngineWeights>,
}

impl RouteOperator {
    /// Create with the reference weight table.
    pub fn default_weights() -> Self {
        Self::from_table(RoutingConfig::default().resolve().unwrap_or_default())
    }

    /// Create from the `[routing]` config section.
    pub fn from_config(config: &RoutingConfig) -> SageResult<Self> {
        Ok(Self::from_table(config.resolve()?))
    }

    pub fn from_table(table: BTreeMap<Intent, EngineWeights>) -> Self {
        Self { table }
    }

    /// Weights for `intent`. Intents without a row use the `General` row;
    /// if that is missing too, the vector is empty and every engine gets
    /// the fusion default weight.
    pub fn get_weights(&self, intent: Intent) -> EngineWeights {
        self.table
            .get(&intent)
            .or_else(|| self.table.get(&Intent::General))
            .cloned()
            .unwrap_or_default()
    }

    /// Weights for an optional intent; unset resolves to `General`.
    pub fn weights_for(&self, intent: Option<Intent>) -> EngineWeights {
        self.get_weights(intent.unwrap_or(Intent::General))
    }
}

impl Default for RouteOperator {
    fn default() -> Self {
        Self::default_weights()
    }
}
