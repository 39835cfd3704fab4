//! Core types and configuration for the market sentiment engine.
//!
//! This crate provides shared types used across all other crates:
//! - Sentiment value types (text results, sub-scores, composites, batch summaries)
//! - Band-table classification
//! - Configuration structures
//! - Common error types

pub mod classifier;
pub mod config;
pub mod error;
pub mod types;

pub use classifier::{classify, Band, BandTable};
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
