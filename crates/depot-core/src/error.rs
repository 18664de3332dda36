//! Error types module
//!
//! All failures surfaced by Depot are unified under the `AppError` enum:
//! record-store, object-store, identity-lookup, and authorization errors.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx`
//! feature so non-database crates can depend on the taxonomy without pulling
//! in a database driver.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;
use uuid::Uuid;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues and authorization denials
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_UNAVAILABLE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Object store error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not owner: {0}")]
    NotOwner(String),

    #[error("Unsupported content type: {content_type}")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Identity service unavailable: {0}")]
    IdentityUnavailable(String),

    #[error("Identity not found: {0}")]
    IdentityNotFound(Uuid),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in the ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            503,
            "STORAGE_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the file ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotOwner(_) => (
            403,
            "NOT_OWNER",
            false,
            Some("Only the file owner may perform this operation"),
            false,
            LogLevel::Warn,
        ),
        AppError::InvalidContentType { .. } => (
            415,
            "INVALID_CONTENT_TYPE",
            false,
            Some("Use one of the allowed content types"),
            false,
            LogLevel::Debug,
        ),
        AppError::IdentityUnavailable(_) => (
            503,
            "IDENTITY_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Warn,
        ),
        AppError::IdentityNotFound(_) => (
            404,
            "IDENTITY_NOT_FOUND",
            false,
            Some("Verify the user ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Unauthorized(_) => (
            401,
            "UNAUTHORIZED",
            false,
            Some("Check API key or requester ID header"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::NotFound(_) => "NotFound",
            AppError::NotOwner(_) => "NotOwner",
            AppError::InvalidContentType { .. } => "InvalidContentType",
            AppError::IdentityUnavailable(_) => "IdentityUnavailable",
            AppError::IdentityNotFound(_) => "IdentityNotFound",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get detailed error information including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access file records".to_string(),
            AppError::Storage(_) => "Failed to access object storage".to_string(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::NotOwner(ref msg) => msg.clone(),
            AppError::InvalidContentType {
                content_type,
                allowed,
            } => {
                format!(
                    "Content type '{}' is not allowed (allowed: {})",
                    content_type,
                    allowed.join(", ")
                )
            }
            AppError::IdentityUnavailable(_) => "Identity service is unavailable".to_string(),
            AppError::IdentityNotFound(user_id) => format!("User not found: {}", user_id),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to access file records");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("File not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "File not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_not_owner() {
        let err = AppError::NotOwner("Only the file owner may delete it".to_string());
        assert_eq!(err.http_status_code(), 403);
        assert_eq!(err.error_code(), "NOT_OWNER");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_invalid_content_type() {
        let err = AppError::InvalidContentType {
            content_type: "application/x-msdownload".to_string(),
            allowed: vec!["image/png".to_string(), "image/jpeg".to_string()],
        };
        assert_eq!(err.http_status_code(), 415);
        assert_eq!(err.error_code(), "INVALID_CONTENT_TYPE");
        assert!(err.client_message().contains("application/x-msdownload"));
        assert!(err.client_message().contains("image/png"));
    }

    #[test]
    fn test_error_metadata_identity() {
        let transient = AppError::IdentityUnavailable("connection refused".to_string());
        assert_eq!(transient.http_status_code(), 503);
        assert!(transient.is_recoverable());
        assert_eq!(transient.log_level(), LogLevel::Warn);

        let definitive = AppError::IdentityNotFound(uuid::Uuid::new_v4());
        assert_eq!(definitive.http_status_code(), 404);
        assert!(!definitive.is_recoverable());
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err = AppError::Storage("timeout".to_string());
        assert_eq!(err.suggested_action(), Some("Retry after a short delay"));

        let err = AppError::NotFound("test".to_string());
        assert_eq!(err.suggested_action(), Some("Verify the file ID exists"));
    }
}
