/**
 * Fallback Handlers
 *
 * Responses for requests no route handles: unknown paths (404) and known
 * paths hit with an unsupported method (405).
 */

use axum::http::{StatusCode, Uri};

use crate::backend::error::BackendError;

/// Route groups whose unknown sub-paths get a group-specific message
const GROUP_NOT_FOUND: [(&str, &str); 3] = [
    ("/api/auth/", "Auth route not found"),
    ("/api/users/", "User route not found"),
    ("/api/qa/", "Q&A route not found"),
];

/// 404 handler for unmatched paths
pub async fn not_found(uri: Uri) -> BackendError {
    let path = uri.path();

    for (prefix, message) in GROUP_NOT_FOUND {
        if let Some(route) = path.strip_prefix(prefix) {
            return BackendError::not_found(message, route);
        }
    }

    BackendError::not_found("Route not found", path)
}

/// 405 handler for known paths with an unsupported method
pub async fn method_not_allowed() -> BackendError {
    BackendError::handler(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
