use crate::intent::Intent;

/// Maps a natural-language query to an [`Intent`].
///
/// Implementations must be total: any input, including empty text,
/// yields an intent (`Intent::General` when nothing else fits).
pub trait IIntentClassifier: Send + Sync {
    fn classify(&self, query: &str) -> Intent;

    /// Human-readable classifier name, for logs.
    fn name(&self) -> &str;
}
