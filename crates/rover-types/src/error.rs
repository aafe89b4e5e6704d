use thiserror::Error;

/// Errors related to rover position operations.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("coordinate {0} is outside the grid (1-200)")]
    InvalidCoordinate(i64),

    #[error("invalid direction: '{0}'")]
    InvalidDirection(String),

    #[error("session identifier cannot be empty")]
    InvalidSession,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors from repository operations (used by trait definitions in rover-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_error_display() {
        let err = PositionError::InvalidCoordinate(201);
        assert_eq!(err.to_string(), "coordinate 201 is outside the grid (1-200)");
    }

    #[test]
    fn test_repository_error_converts() {
        let err: PositionError = RepositoryError::Query("syntax error".to_string()).into();
        assert_eq!(err.to_string(), "storage error: query error: syntax error");
    }
}
