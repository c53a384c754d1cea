//! Engine degradation tracking.

pub mod tracker;

pub use tracker::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
