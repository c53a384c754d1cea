//! Per-request data model shared by the classifier, the engines, and the orchestrator.

pub mod chunk;
pub mod engine_weights;
pub mod fusion_report;
pub mod query_context;
pub mod retrieved_node;

pub use chunk::{Chunk, DocumentMetadata};
pub use engine_weights::EngineWeights;
pub use fusion_report::{EngineFailure, EngineOutcome, EngineStatus, FusionReport};
pub use query_context::{MetadataFilters, QueryContext};
pub use retrieved_node::{RetrievedNode, ScoreContribution};
