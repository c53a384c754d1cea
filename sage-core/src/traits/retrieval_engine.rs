use crate::errors::SageResult;
use crate::models::{QueryContext, RetrievedNode};

/// A retrieval backend. Opaque to the orchestrator: it scores candidates
/// on its own scale, which the orchestrator normalizes per call.
///
/// Calls are synchronous and may block. The context is read-only.
/// Engines are registered under an explicit id; the id, not the
/// implementing type, keys weight lookup and candidate tagging.
pub trait IRetrievalEngine: Send + Sync {
    /// Return scored candidates for the query. Order is irrelevant.
    fn retrieve(&self, context: &QueryContext) -> SageResult<Vec<RetrievedNode>>;
}
