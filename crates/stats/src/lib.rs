//! Batch and time-window statistics over sentiment results.

pub mod batch;
pub mod window;

pub use batch::BatchStatistics;
pub use window::{ScoredItem, TimeWindow};
