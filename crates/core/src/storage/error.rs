use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("No fields to update for {entity_type} {id}")]
    NoOp {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn hotel_not_found(id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type: "Hotel",
            id: id.to_string(),
        }
    }

    pub fn reservation_not_found(id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type: "Reservation",
            id: id.to_string(),
        }
    }

    /// Returns true for a terminal lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::hotel_not_found("abc-123");
        assert_eq!(error.to_string(), "Hotel not found: abc-123");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_repository_error_no_op_display() {
        let error = RepositoryError::NoOp {
            entity_type: "Hotel",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "No fields to update for Hotel abc-123");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("bad filter".to_string());
        assert_eq!(error.to_string(), "Query failed: bad filter");
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("negative rooms".to_string());
        assert_eq!(error.to_string(), "Invalid data: negative rooms");
    }
}
