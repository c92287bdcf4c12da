/**
 * Handler Response Types
 *
 * Response bodies shared across the endpoint handlers.
 *
 * Every resource endpoint answers with the same envelope:
 *
 * ```json
 * {
 *   "success": true,
 *   "message": "Get documents endpoint working",
 *   "documents": [],
 *   "timestamp": "2024-01-01T00:00:00.000Z"
 * }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::database::ConnectionStatus;

/// Current time as an RFC 3339 UTC timestamp with millisecond precision
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Success envelope returned by resource endpoints
#[derive(Serialize, Debug, Clone)]
pub struct EndpointResponse {
    pub success: bool,
    pub message: &'static str,
    /// Endpoint-specific fields, flattened into the envelope
    #[serde(flatten)]
    pub data: Map<String, Value>,
    pub timestamp: String,
}

impl EndpointResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
            data: Map::new(),
            timestamp: timestamp(),
        }
    }

    /// Add an endpoint-specific field
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Add an empty list field
    pub fn with_empty_list(self, key: &str) -> Self {
        self.with(key, Value::Array(Vec::new()))
    }
}

impl IntoResponse for EndpointResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Health check response
#[derive(Serialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub environment: String,
    pub database: ConnectionStatus,
}

/// Entry in the public endpoint table
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_flattens_data() {
        let response = EndpointResponse::new("Get lawyer by ID endpoint working")
            .with("lawyerId", "42")
            .with_empty_list("results");

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Get lawyer by ID endpoint working"));
        assert_eq!(body["lawyerId"], json!("42"));
        assert_eq!(body["results"], json!([]));
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
