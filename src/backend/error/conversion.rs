/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, so handlers and
 * middleware can return them directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "error": "Error message",
 *   "status": 404,
 *   "route": "unmatched/path"
 * }
 * ```
 *
 * `route` is only present for `NotFound`.
 */

use axum::{
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        }

        let mut body = json!({
            "success": false,
            "error": self.message(),
            "status": status.as_u16(),
        });

        if let BackendError::NotFound { route, .. } = &self {
            body["route"] = json!(route);
        }

        (status, Json(body)).into_response()
    }
}
