//! Unified error handling for HomeGuard services
//!
//! One error type shared by every crate in the workspace, with a stable
//! mapping to HTTP status codes and the wire-level error envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ErrorInfo - API error response type
// ============================================================================

/// Standard error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (HTTP status or custom)
    pub code: u16,
    /// Error message
    pub message: String,
    /// Detailed error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorInfo {
    /// Create a new ErrorInfo with just a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: 500,
            message: message.into(),
            details: None,
        }
    }

    /// Set the error code
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// Add details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// ============================================================================
// HomeguardError - Main error type
// ============================================================================

/// Main error type for all HomeGuard services
#[derive(Debug, Error)]
pub enum HomeguardError {
    // ======================================
    // Configuration Errors
    // ======================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ======================================
    // Storage Errors
    // ======================================
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ======================================
    // Domain Errors
    // ======================================
    #[error("Unknown hazard type: {0}")]
    UnknownHazardType(String),

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {resource} already exists")]
    Conflict { resource: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // ======================================
    // External Service Errors
    // ======================================
    #[error("External service error: {service}: {message}")]
    ExternalService { service: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    // ======================================
    // Catch-all
    // ======================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HomeguardError
pub type HomeguardResult<T> = Result<T, HomeguardError>;

impl HomeguardError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) | Self::UnknownHazardType(_) => 400,

            // 401 Unauthorized
            Self::Unauthorized(_) => 401,

            // 404 Not Found
            Self::NotFound { .. } => 404,

            // 409 Conflict
            Self::Conflict { .. } => 409,

            // 502 Bad Gateway
            Self::ExternalService { .. } | Self::HttpClient(_) => 502,

            // 500 Internal Server Error
            Self::Configuration(_)
            | Self::Sqlite(_)
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Get error code (for API responses, logs, monitoring)
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Sqlite(_) => "SQLITE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::UnknownHazardType(_) => "UNKNOWN_HAZARD_TYPE",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::HttpClient(_) => "HTTP_CLIENT_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Other(_) => "OTHER_ERROR",
        }
    }

    /// Convert to API ErrorInfo for HTTP responses
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo::new(self.to_string()).with_code(self.status_code())
    }

    /// Helper for building a not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Helper for building a conflict error
    pub fn conflict(resource: impl Into<String>) -> Self {
        Self::Conflict {
            resource: resource.into(),
        }
    }
}

// Conversion traits for common error types
impl From<serde_json::Error> for HomeguardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// ============================================================================
// Axum integration
// ============================================================================

#[cfg(feature = "axum-support")]
#[allow(clippy::disallowed_methods)] // json! macro internally uses unwrap (safe for known valid JSON)
impl axum::response::IntoResponse for HomeguardError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        use axum::response::Json;
        use serde_json::json;

        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!("{}: {}", self.error_code(), self);
        }

        let body = Json(json!({
            "success": false,
            "error": {
                "code": self.status_code(),
                "error_code": self.error_code(),
                "message": self.to_string(),
            },
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            HomeguardError::Validation("test".into()).status_code(),
            400
        );
        assert_eq!(
            HomeguardError::UnknownHazardType("yeti".into()).status_code(),
            400
        );
        assert_eq!(
            HomeguardError::Unauthorized("test".into()).status_code(),
            401
        );
        assert_eq!(HomeguardError::not_found("user").status_code(), 404);
        assert_eq!(HomeguardError::conflict("username").status_code(), 409);
        assert_eq!(HomeguardError::Internal("test".into()).status_code(), 500);
    }

    #[test]
    fn test_error_display() {
        let err = HomeguardError::UnknownHazardType("yeti".to_string());
        assert_eq!(format!("{}", err), "Unknown hazard type: yeti");

        let err = HomeguardError::not_found("user user_123");
        assert_eq!(format!("{}", err), "Not found: user user_123");
    }

    #[test]
    fn test_error_info() {
        let err = HomeguardError::conflict("username");
        let info = err.to_error_info();
        assert_eq!(info.code, 409);
        assert!(info.message.contains("username"));
    }
}
