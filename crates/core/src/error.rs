//! Error types for the sentiment engine.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the sentiment engine.
///
/// Degenerate inputs (empty text, composites with nothing present) are not
/// errors; they produce zero-coverage results instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (weights, band tables, thresholds).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The same sub-score name was supplied twice in one aggregation call.
    #[error("Duplicate component name: {0}")]
    DuplicateComponent(String),

    /// A sub-score weight that is not a finite positive number.
    #[error("Invalid weight for component '{name}': {weight}")]
    InvalidWeight { name: String, weight: f64 },

    /// A present sub-score outside [-1, 1].
    #[error("Score out of range for component '{name}': {score}")]
    ScoreOutOfRange { name: String, score: f64 },

    /// A lexical model could not score its input.
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a lexicon error.
    pub fn lexicon(msg: impl Into<String>) -> Self {
        Error::Lexicon(msg.into())
    }

    /// Whether this error is a caller contract violation rather than a data condition.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::DuplicateComponent(_)
                | Error::InvalidWeight { .. }
                | Error::ScoreOutOfRange { .. }
        )
    }
}
