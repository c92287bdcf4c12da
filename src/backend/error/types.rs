/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are returned from HTTP handlers and middleware and converted
 * to JSON responses.
 *
 * # Error Types
 *
 * - `HandlerError` - Request-level failures with an explicit status
 *   (e.g. method not allowed)
 * - `ServiceUnavailable` - The database is not connected
 * - `NotFound` - No route matched the request path
 * - `SerializationError` - JSON serialization failures
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use nyaymitra::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
/// assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
///
/// let err = BackendError::service_unavailable("Database unavailable");
/// assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit HTTP status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// The database connection is not ready
    ///
    /// Returned by the readiness guard in front of persistence-backed routes.
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// Human-readable error message
        message: String,
    },

    /// No route matched
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
        /// The unmatched part of the request path
        route: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, route: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            route: route.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `ServiceUnavailable` - 503 Service Unavailable
    /// - `NotFound` - 404 Not Found
    /// - `SerializationError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::ServiceUnavailable { message } => message.clone(),
            Self::NotFound { message, .. } => message.clone(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
                assert_eq!(message, "Method not allowed");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_not_found_keeps_route() {
        let error = BackendError::not_found("Auth route not found", "reset-password");
        match error {
            BackendError::NotFound { message, route } => {
                assert_eq!(message, "Auth route not found");
                assert_eq!(route, "reset-password");
            }
            _ => panic!("Expected NotFound"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        let handler_error = BackendError::handler(StatusCode::BAD_REQUEST, "Bad request");
        assert_eq!(handler_error.status_code(), StatusCode::BAD_REQUEST);

        let unavailable = BackendError::service_unavailable("Database unavailable");
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let not_found = BackendError::not_found("Route not found", "/nope");
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_from_serde_error() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let backend_error: BackendError = serde_error.into();
        assert_eq!(
            backend_error.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
