//! Error types for the vozfin-core library.

use thiserror::Error;

/// Main error type for the vozfin library.
#[derive(Error, Debug)]
pub enum VozError {
    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors reported by the strict parsing API.
///
/// The lenient entry points never fail; these only exist so callers that
/// need a hard "did not understand" signal can get one as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The transcript matched neither income nor expense vocabulary.
    #[error("transcript not recognized: {0:?}")]
    Unrecognized(String),

    /// No field could be inferred from the transcript.
    #[error("no data found in transcript")]
    NoData,
}

/// Result type for the vozfin library.
pub type Result<T> = std::result::Result<T, VozError>;
