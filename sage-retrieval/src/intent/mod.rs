//! Intent classification and intent → engine weight routing.

pub mod classifier;
pub mod route_operator;

pub use classifier::KeywordIntentClassifier;
pub use route_operator::RouteOperator;
