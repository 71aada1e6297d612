use thiserror::Error;

/// Errors that can occur against the search index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Index write failed: {0}")]
    Write(String),
    #[error("Index commit failed: {0}")]
    Commit(String),
    #[error("Index query failed: {0}")]
    Query(String),
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
