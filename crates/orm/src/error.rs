//! Error types for the ORM system
//!
//! Driver errors are classified on conversion so callers can match on
//! not-found and uniqueness failures without inspecting SQL messages.

use std::fmt;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for ORM operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Database connection or query error
    Database(String),
    /// Model not found in database
    NotFound(String),
    /// A UNIQUE constraint rejected the write; holds the offending column
    UniqueViolation(String),
    /// Connection pool error
    Connection(String),
    /// Transaction error
    Transaction(String),
    /// Schema error
    Schema(String),
    /// Configuration error
    Configuration(String),
}

impl ModelError {
    /// Whether this error is a uniqueness violation on `column`
    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        matches!(self, ModelError::UniqueViolation(c) if c == column)
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Database(msg) => write!(f, "Database error: {}", msg),
            ModelError::NotFound(what) => write!(f, "Record not found: {}", what),
            ModelError::UniqueViolation(column) => {
                write!(f, "Unique constraint violated on column '{}'", column)
            }
            ModelError::Connection(msg) => write!(f, "Connection error: {}", msg),
            ModelError::Transaction(msg) => write!(f, "Transaction error: {}", msg),
            ModelError::Schema(msg) => write!(f, "Schema error: {}", msg),
            ModelError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

// Convert from sqlx errors
impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ModelError::NotFound("row".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                ModelError::UniqueViolation(unique_column(db_err.message()))
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ModelError::Connection(err.to_string())
            }
            other => ModelError::Database(other.to_string()),
        }
    }
}

impl From<quill_core::ConfigError> for ModelError {
    fn from(err: quill_core::ConfigError) -> Self {
        ModelError::Configuration(err.to_string())
    }
}

/// Extract the column name from a SQLite message such as
/// `UNIQUE constraint failed: posts.title`.
fn unique_column(message: &str) -> String {
    message
        .strip_prefix("UNIQUE constraint failed: ")
        .and_then(|columns| columns.split(',').next())
        .map(|qualified| qualified.trim().rsplit('.').next().unwrap_or(qualified).to_string())
        .unwrap_or_else(|| message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_column_from_sqlite_message() {
        assert_eq!(unique_column("UNIQUE constraint failed: posts.title"), "title");
        assert_eq!(
            unique_column("UNIQUE constraint failed: posts.title, posts.author"),
            "title"
        );
        assert_eq!(unique_column("something else"), "something else");
    }

    #[test]
    fn test_row_not_found_conversion() {
        let err = ModelError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_pool_errors_are_connection_errors() {
        let err = ModelError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ModelError::Connection(_)));
    }

    #[test]
    fn test_display() {
        let err = ModelError::UniqueViolation("title".to_string());
        assert_eq!(err.to_string(), "Unique constraint violated on column 'title'");
        assert!(err.is_unique_violation_on("title"));
        assert!(!err.is_unique_violation_on("author"));
    }
}
