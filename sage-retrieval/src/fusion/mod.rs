//! Fusion: normalize → weight → merge by chunk id → rank.

pub mod merge;
pub mod normalize;
pub mod orchestrator;

pub use merge::{fuse, rank, EngineResults};
pub use normalize::min_max_normalize;
pub use orchestrator::FusionRetriever;
