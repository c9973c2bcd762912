//! Error types for query compilation and the in-memory store.

use thiserror::Error;

/// Errors raised while compiling a query.
///
/// Only [`QueryError::MalformedQuery`] is raised in the default lenient mode.
/// The other two variants surface only when strict mode is enabled; otherwise
/// the offending condition silently matches nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Unrecognized condition: {0}")]
    UnrecognizedCondition(String),

    #[error("Missing parameter: @{0}")]
    MissingParameter(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised by the in-memory container store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid partition key property name: {0:?}")]
    InvalidPartitionKey(String),

    #[error("Item not found: id={id}, partition key={partition_key}")]
    NotFound { id: String, partition_key: String },

    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = QueryError::MalformedQuery("missing WHERE".to_string());
        assert_eq!(err.to_string(), "Malformed query: missing WHERE");

        let err = QueryError::MissingParameter("name".to_string());
        assert_eq!(err.to_string(), "Missing parameter: @name");

        let err = StoreError::NotFound {
            id: "1".to_string(),
            partition_key: "US".to_string(),
        };
        assert_eq!(err.to_string(), "Item not found: id=1, partition key=US");
    }

    #[test]
    fn test_query_error_converts_into_store_error() {
        let err: StoreError = QueryError::UnrecognizedCondition("c.x".to_string()).into();
        assert_eq!(err.to_string(), "Unrecognized condition: c.x");
    }
}
