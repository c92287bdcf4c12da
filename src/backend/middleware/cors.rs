/**
 * CORS Configuration
 *
 * Browser clients are served from a different origin than the API. The
 * layer mirrors the request origin so credentials can be allowed, and
 * answers preflight `OPTIONS` requests itself.
 */

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, DATE},
    HeaderName, Method,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Request headers browsers may send on cross-origin calls
const ALLOWED_HEADERS: [HeaderName; 10] = [
    HeaderName::from_static("x-csrf-token"),
    HeaderName::from_static("x-requested-with"),
    ACCEPT,
    HeaderName::from_static("accept-version"),
    CONTENT_LENGTH,
    HeaderName::from_static("content-md5"),
    CONTENT_TYPE,
    DATE,
    HeaderName::from_static("x-api-version"),
    AUTHORIZATION,
];

/// Build the CORS layer applied to every route
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers(ALLOWED_HEADERS)
}
