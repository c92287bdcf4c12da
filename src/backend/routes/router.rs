/**
 * Router Creation
 *
 * Assembles the full application router.
 *
 * # Layering
 *
 * 1. Resource routes, each method handler behind the database readiness
 *    guard (unmatched paths and methods still reach the 404/405 fallbacks)
 * 2. `/api` and `/api/health`, never gated
 * 3. JSON 404 fallback
 * 4. Request tracing, then CORS, around everything
 */

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::handlers::fallback::{method_not_allowed, not_found};
use crate::backend::handlers::health::{api_index, health_check};
use crate::backend::middleware::cors_layer;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the application router with all routes and middleware
pub fn create_router(app_state: AppState) -> Router {
    let resources = configure_api_routes(Router::new(), &app_state);

    Router::new()
        .route("/api", get(api_index).fallback(method_not_allowed))
        .route("/api/health", get(health_check).fallback(method_not_allowed))
        .merge(resources)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(app_state)
}
