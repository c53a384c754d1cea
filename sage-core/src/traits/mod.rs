mod intent_classifier;
mod retrieval_engine;

pub use intent_classifier::IIntentClassifier;
pub use retrieval_engine::IRetrievalEngine;
