//! # sage-retrieval
//!
//! Fusion retrieval: classify the query's intent, pick per-engine weights,
//! fan the query out to every registered engine concurrently, normalize each
//! engine's scores, weight, merge by chunk id, and rank.

pub mod engines;
pub mod fusion;
pub mod intent;
pub mod registry;

pub use fusion::FusionRetriever;
pub use intent::{KeywordIntentClassifier, RouteOperator};
pub use registry::{EngineRegistry, RegisteredEngine};
