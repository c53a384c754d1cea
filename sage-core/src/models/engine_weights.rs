use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ENGINE_WEIGHT;

/// Engine id → non-negative fusion weight for one intent.
/// Weights conventionally sum to about 1.0; nothing enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineWeights(BTreeMap<String, f64>);

impl EngineWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self(pairs.iter().map(|(id, w)| (id.to_string(), *w)).collect())
    }

    pub fn insert(&mut self, engine_id: impl Into<String>, weight: f64) {
        self.0.insert(engine_id.into(), weight);
    }

    pub fn get(&self, engine_id: &str) -> Option<f64> {
        self.0.get(engine_id).copied()
    }

    /// Weight for `engine_id`, or `default` if the engine is absent.
    pub fn weight_or(&self, engine_id: &str, default: f64) -> f64 {
        self.get(engine_id).unwrap_or(default)
    }

    /// Weight for `engine_id`, falling back to [`DEFAULT_ENGINE_WEIGHT`].
    pub fn weight_for(&self, engine_id: &str) -> f64 {
        self.weight_or(engine_id, DEFAULT_ENGINE_WEIGHT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(String, f64)> for EngineWeights {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
