//! Error types for the bigram analyzer.

use thiserror::Error;

/// Top-level error type.
///
/// Degenerate numeric cases (zero denominators, unseen words) never show up
/// here: they resolve to a score of 0 or an empty result.
#[derive(Debug, Error)]
pub enum BigramError {
    /// Invalid configuration or lexicon contents.
    #[error("configuration error: {0}")]
    Config(String),

    /// The lemmatizer backend could not process a token.
    #[error("lemmatizer failed on token '{token}': {reason}")]
    Backend { token: String, reason: String },

    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON config error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Lemmatization cache could not be encoded or decoded.
    #[error("cache error: {0}")]
    Cache(#[from] bincode::Error),
}

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, BigramError>;
