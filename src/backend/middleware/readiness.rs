/**
 * Database Readiness Middleware
 *
 * Guards routes that need persisted data. While the connection manager is
 * not connected, requests are answered with `503 Service Unavailable`
 * instead of reaching the handler.
 */

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::backend::error::BackendError;
use crate::database::ConnectionManager;

/// Reject the request with 503 unless the database is connected
pub async fn require_database(
    State(database): State<Arc<ConnectionManager>>,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    if !database.is_ready() {
        tracing::warn!(
            path = %request.uri().path(),
            phase = database.phase().as_str(),
            "Rejecting request: database unavailable"
        );
        return Err(BackendError::service_unavailable("Database unavailable"));
    }

    Ok(next.run(request).await)
}
