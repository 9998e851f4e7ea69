//! StudyMate error taxonomy.
//!
//! Only `Retrieval` crosses the pipeline boundary while answering a query.
//! A malformed topic-selection reply and an unknown topic id are recovered
//! where they happen and never become errors.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StudyMateError>;

#[derive(Debug, Error)]
pub enum StudyMateError {
    /// Transport or service failure from an external dependency: the
    /// embedding service, the vector index, or a generation endpoint.
    /// Always propagated to the caller, never silently swallowed.
    #[error("retrieval failure: {0}")]
    Retrieval(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The topic catalog file could not be read or parsed.
    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
