/**
 * Health and Index Handlers
 *
 * These routes are never gated on the database: health reports the
 * connection state instead of failing with it.
 *
 * # Routes
 *
 * - `GET /api` - Service name, version and endpoint table
 * - `GET /api/health` - Liveness plus database connection status
 */

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::backend::handlers::types::{timestamp, HealthResponse};
use crate::backend::routes::api_routes::API_ENDPOINTS;
use crate::backend::server::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check handler
///
/// Always answers 200 while the process is serving; `database.connected`
/// tells whether persistence-backed routes are currently available.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "OK",
///   "message": "API is healthy",
///   "timestamp": "2024-01-01T00:00:00.000Z",
///   "version": "0.1.0",
///   "environment": "development",
///   "database": { "connected": true, "phase": "connected", "host": "localhost:27017" }
/// }
/// ```
pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "API is healthy",
        timestamp: timestamp(),
        version: VERSION,
        environment: app_state.environment.clone(),
        database: app_state.database.status(),
    })
}

/// API index handler
pub async fn api_index() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Nyaymitra API",
        "version": VERSION,
        "endpoints": API_ENDPOINTS,
        "timestamp": timestamp(),
    }))
}
