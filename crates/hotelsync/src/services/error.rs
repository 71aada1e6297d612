//! Service-layer error taxonomy.

use thiserror::Error;

use hotelsync_core::cache::CacheError;
use hotelsync_core::events::EventError;
use hotelsync_core::hotel::ValidationError;
use hotelsync_core::search::IndexError;
use hotelsync_core::storage::{repository_error_to_status_code, RepositoryError};

/// Errors returned by the hotel, reservation and search services.
///
/// Stage variants name the stage that failed. Stages that ran before the
/// failing one are not rolled back.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("store stage failed: {0}")]
    Store(RepositoryError),
    #[error("cache stage failed: {0}")]
    Cache(CacheError),
    #[error("publish stage failed: {0}")]
    Transport(EventError),
    #[error("index stage failed: {0}")]
    IndexCommit(IndexError),
    #[error("index query failed: {0}")]
    IndexQuery(IndexError),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("no fields to update for hotel {0}")]
    NoOp(String),
}

impl ServiceError {
    pub fn hotel_not_found(id: impl ToString) -> Self {
        ServiceError::NotFound {
            entity_type: "Hotel",
            id: id.to_string(),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity_type, id } => {
                ServiceError::NotFound { entity_type, id }
            }
            RepositoryError::NoOp { id, .. } => ServiceError::NoOp(id),
            other => ServiceError::Store(other),
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `NotFound` -> 404
/// - `Validation` -> 400
/// - `NoOp` -> 422
/// - `Store` -> per [`repository_error_to_status_code`] (503 for connection failures)
/// - `Cache`, `Transport` -> 502
/// - `IndexCommit`, `IndexQuery` -> 500
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::NotFound { .. } => 404,
        ServiceError::Validation(_) => 400,
        ServiceError::NoOp(_) => 422,
        ServiceError::Store(err) => repository_error_to_status_code(err),
        ServiceError::Cache(_) | ServiceError::Transport(_) => 502,
        ServiceError::IndexCommit(_) | ServiceError::IndexQuery(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_errors_name_the_stage() {
        let err = ServiceError::Cache(CacheError::ConnectionFailed("refused".to_string()));
        assert_eq!(
            err.to_string(),
            "cache stage failed: Cache connection failed: refused"
        );

        let err = ServiceError::Transport(EventError::Transport("broken pipe".to_string()));
        assert!(err.to_string().starts_with("publish stage failed"));
    }

    #[test]
    fn test_repository_errors_are_classified() {
        assert_eq!(
            ServiceError::from(RepositoryError::hotel_not_found("h1")),
            ServiceError::hotel_not_found("h1")
        );
        assert_eq!(
            ServiceError::from(RepositoryError::NoOp {
                entity_type: "Hotel",
                id: "h1".to_string()
            }),
            ServiceError::NoOp("h1".to_string())
        );
        assert!(matches!(
            ServiceError::from(RepositoryError::QueryFailed("x".to_string())),
            ServiceError::Store(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        let status = |e: ServiceError| service_error_to_status_code(&e);

        assert_eq!(status(ServiceError::hotel_not_found("h1")), 404);
        assert_eq!(status(ValidationError::InvalidStay.into()), 400);
        assert_eq!(status(ServiceError::NoOp("h1".to_string())), 422);
        assert_eq!(
            status(ServiceError::Store(RepositoryError::ConnectionFailed(
                "down".to_string()
            ))),
            503
        );
        assert_eq!(
            status(ServiceError::Store(RepositoryError::QueryFailed(
                "bad".to_string()
            ))),
            500
        );
        assert_eq!(
            status(ServiceError::Cache(CacheError::OperationFailed(
                "x".to_string()
            ))),
            502
        );
        assert_eq!(status(ServiceError::Transport(EventError::Closed)), 502);
        assert_eq!(
            status(ServiceError::IndexCommit(IndexError::Commit("x".to_string()))),
            500
        );
        assert_eq!(
            status(ServiceError::IndexQuery(IndexError::Query("x".to_string()))),
            500
        );
    }
}
