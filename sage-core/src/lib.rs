//! # sage-core
//!
//! Foundation crate for the Sage retrieval worker.
//! Defines the query/candidate data model, the engine and classifier
//! capabilities, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SageConfig;
pub use errors::{SageError, SageResult};
pub use intent::Intent;
pub use models::{Chunk, DocumentMetadata, EngineWeights, QueryContext, RetrievedNode};
