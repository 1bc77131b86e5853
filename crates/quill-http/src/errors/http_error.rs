//! HTTP server error types
//!
//! Every failure a handler can return. Each variant maps to a status code
//! and renders as an HTML error page (see `responses`).

use quill_orm::ModelError;
use std::error::Error as StdError;
use thiserror::Error;

/// Result type for HTTP operations
pub type HttpResult<T> = Result<T, HttpError>;

/// HTTP server errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Server startup failed: {message}")]
    StartupFailed { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Resource already exists: {message}")]
    Conflict { message: String },

    #[error("Database error: {message}")]
    DatabaseError { message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl HttpError {
    /// Create a startup error
    pub fn startup<T: Into<String>>(message: T) -> Self {
        HttpError::StartupFailed {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        HttpError::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<T: Into<String>>(resource: T) -> Self {
        HttpError::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an internal error
    pub fn internal<T: Into<String>>(message: T) -> Self {
        HttpError::InternalError {
            message: message.into(),
        }
    }

    /// Get error code for logs and error pages
    pub fn error_code(&self) -> &'static str {
        match self {
            HttpError::StartupFailed { .. } => "SERVER_STARTUP_FAILED",
            HttpError::ConfigError { .. } => "CONFIGURATION_ERROR",
            HttpError::BadRequest { .. } => "BAD_REQUEST",
            HttpError::NotFound { .. } => "RESOURCE_NOT_FOUND",
            HttpError::Conflict { .. } => "RESOURCE_CONFLICT",
            HttpError::DatabaseError { .. } => "DATABASE_ERROR",
            HttpError::TemplateError { .. } => "TEMPLATE_ERROR",
            HttpError::InternalError { .. } => "INTERNAL_ERROR",
        }
    }
}

// Convert from quill-core ConfigError
impl From<quill_core::ConfigError> for HttpError {
    fn from(err: quill_core::ConfigError) -> Self {
        HttpError::ConfigError {
            message: err.to_string(),
        }
    }
}

// Convert from std::io::Error
impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        HttpError::InternalError {
            message: format!("IO error: {}", err),
        }
    }
}

// Tera nests the useful detail (missing variable, bad filter) in the source chain
impl From<tera::Error> for HttpError {
    fn from(err: tera::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        HttpError::TemplateError { message }
    }
}

// Convert from ORM ModelError to HttpError
impl From<ModelError> for HttpError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound(resource) => HttpError::NotFound { resource },
            ModelError::UniqueViolation(column) => HttpError::Conflict {
                message: format!("{} already exists", column),
            },
            ModelError::Configuration(msg) => HttpError::ConfigError { message: msg },
            ModelError::Database(msg) => HttpError::DatabaseError { message: msg },
            ModelError::Connection(msg) => HttpError::DatabaseError {
                message: format!("Connection error: {}", msg),
            },
            ModelError::Transaction(msg) => HttpError::DatabaseError {
                message: format!("Transaction error: {}", msg),
            },
            ModelError::Schema(msg) => HttpError::DatabaseError {
                message: format!("Schema error: {}", msg),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = HttpError::startup("Failed to bind to port");
        assert!(matches!(error, HttpError::StartupFailed { .. }));
        assert_eq!(error.error_code(), "SERVER_STARTUP_FAILED");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(HttpError::bad_request("test").error_code(), "BAD_REQUEST");
        assert_eq!(HttpError::not_found("post 7").error_code(), "RESOURCE_NOT_FOUND");
        assert_eq!(HttpError::internal("test").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_config_error_conversion() {
        let config_error = quill_core::ConfigError::validation_failed("Test validation error");
        let http_error = HttpError::from(config_error);
        assert!(matches!(http_error, HttpError::ConfigError { .. }));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Access denied");
        let http_error = HttpError::from(io_error);
        assert!(matches!(http_error, HttpError::InternalError { .. }));
    }

    #[test]
    fn test_model_error_conversion() {
        let not_found = HttpError::from(ModelError::NotFound("post 3".to_string()));
        assert!(matches!(not_found, HttpError::NotFound { ref resource } if resource == "post 3"));

        let duplicate = HttpError::from(ModelError::UniqueViolation("title".to_string()));
        assert!(matches!(duplicate, HttpError::Conflict { .. }));

        let db = HttpError::from(ModelError::Connection("pool closed".to_string()));
        assert_eq!(db.error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_template_error_includes_cause() {
        let tera = tera::Tera::default();
        let err = tera
            .render("missing.html", &tera::Context::new())
            .unwrap_err();

        let http_error = HttpError::from(err);
        assert_eq!(http_error.error_code(), "TEMPLATE_ERROR");
        assert!(http_error.to_string().contains("missing.html"));
    }
}
