/**
 * API Route Configuration
 *
 * Routes for the persistence-backed resources. Every method handler sits
 * behind the database readiness guard; the 405 fallback does not, so a
 * wrong method is reported as such even while the database is down.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/login`
 * - `POST /api/auth/register`
 * - `GET /api/auth/me`
 *
 * ## Documents
 * - `POST /api/documents/upload`
 * - `GET /api/documents`
 * - `GET|PUT|DELETE /api/documents/{document_id}`
 *
 * ## Users
 * - `GET|PUT /api/users/profile`
 * - `POST /api/users/logout`
 *
 * ## Lawyers
 * - `GET /api/lawyers`
 * - `GET /api/lawyers/search`
 * - `GET /api/lawyers/{lawyer_id}`
 *
 * ## Q&A
 * - `GET /api/qa/faqs`
 * - `GET /api/qa/search`
 * - `GET /api/qa/categories`
 * - `POST /api/qa/submit-question`
 */

use axum::middleware;
use axum::routing::{get, post, MethodRouter};
use axum::Router;

use crate::backend::handlers::fallback::method_not_allowed;
use crate::backend::middleware::require_database;
use crate::backend::handlers::types::EndpointInfo;
use crate::backend::handlers::{auth, documents, lawyers, qa, users};
use crate::backend::server::state::AppState;

/// Public endpoint table, served by `GET /api` and used by the endpoint
/// smoke test binary.
pub const API_ENDPOINTS: &[EndpointInfo] = &[
    EndpointInfo { method: "GET", path: "/api", description: "Main API endpoint" },
    EndpointInfo { method: "GET", path: "/api/health", description: "Health check" },
    EndpointInfo { method: "POST", path: "/api/auth/login", description: "User login" },
    EndpointInfo { method: "POST", path: "/api/auth/register", description: "User registration" },
    EndpointInfo { method: "GET", path: "/api/auth/me", description: "Get current user" },
    EndpointInfo { method: "GET", path: "/api/documents", description: "Get user documents" },
    EndpointInfo { method: "POST", path: "/api/documents/upload", description: "Upload document" },
    EndpointInfo { method: "GET", path: "/api/users/profile", description: "Get user profile" },
    EndpointInfo { method: "GET", path: "/api/lawyers", description: "Get lawyers list" },
    EndpointInfo { method: "GET", path: "/api/lawyers/search", description: "Search lawyers" },
    EndpointInfo { method: "GET", path: "/api/qa/faqs", description: "Get FAQs" },
    EndpointInfo { method: "GET", path: "/api/qa/search", description: "Search FAQs" },
    EndpointInfo { method: "GET", path: "/api/qa/categories", description: "Get FAQ categories" },
    EndpointInfo { method: "POST", path: "/api/qa/submit-question", description: "Submit question" },
];

/// Configure the resource routes
///
/// Every route answers an unsupported method with a JSON 405.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let readiness = middleware::from_fn_with_state(app_state.clone(), require_database);
    let guarded = |handlers: MethodRouter<AppState>| {
        handlers
            .route_layer(readiness.clone())
            .fallback(method_not_allowed)
    };

    router
        // Authentication endpoints
        .route("/api/auth/login", guarded(post(auth::login)))
        .route("/api/auth/register", guarded(post(auth::register)))
        .route("/api/auth/me", guarded(get(auth::me)))
        // Document endpoints
        .route("/api/documents", guarded(get(documents::list_documents)))
        .route("/api/documents/upload", guarded(post(documents::upload_document)))
        .route(
            "/api/documents/{document_id}",
            guarded(
                get(documents::get_document)
                    .put(documents::update_document)
                    .delete(documents::delete_document),
            ),
        )
        // User endpoints
        .route(
            "/api/users/profile",
            guarded(get(users::get_profile).put(users::update_profile)),
        )
        .route("/api/users/logout", guarded(post(users::logout)))
        // Lawyer directory endpoints
        .route("/api/lawyers", guarded(get(lawyers::list_lawyers)))
        .route("/api/lawyers/search", guarded(get(lawyers::search_lawyers)))
        .route("/api/lawyers/{lawyer_id}", guarded(get(lawyers::get_lawyer)))
        // Q&A endpoints
        .route("/api/qa/faqs", guarded(get(qa::list_faqs)))
        .route("/api/qa/search", guarded(get(qa::search_faqs)))
        .route("/api/qa/categories", guarded(get(qa::list_categories)))
        .route("/api/qa/submit-question", guarded(post(qa::submit_question)))
}
