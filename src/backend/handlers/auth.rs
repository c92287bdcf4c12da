/**
 * Authentication Handlers
 *
 * Handlers for the `/api/auth` routes. No credential verification or session
 * issuing exists yet; each endpoint acknowledges the request.
 *
 * # Routes
 *
 * - `POST /api/auth/login`
 * - `POST /api/auth/register`
 * - `GET /api/auth/me`
 */

use crate::backend::handlers::types::EndpointResponse;

/// Login handler
pub async fn login() -> EndpointResponse {
    EndpointResponse::new("Login endpoint working")
}

/// Registration handler
pub async fn register() -> EndpointResponse {
    EndpointResponse::new("Register endpoint working")
}

/// Current user handler
pub async fn me() -> EndpointResponse {
    EndpointResponse::new("User info endpoint working")
}
