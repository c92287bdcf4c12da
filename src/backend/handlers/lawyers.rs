/**
 * Lawyer Directory Handlers
 *
 * # Routes
 *
 * - `GET /api/lawyers`
 * - `GET /api/lawyers/search`
 * - `GET /api/lawyers/{lawyer_id}`
 */

use axum::extract::Path;

use crate::backend::handlers::types::EndpointResponse;

pub async fn list_lawyers() -> EndpointResponse {
    EndpointResponse::new("Get lawyers endpoint working").with_empty_list("lawyers")
}

pub async fn search_lawyers() -> EndpointResponse {
    EndpointResponse::new("Search lawyers endpoint working").with_empty_list("results")
}

pub async fn get_lawyer(Path(lawyer_id): Path<String>) -> EndpointResponse {
    EndpointResponse::new("Get lawyer by ID endpoint working").with("lawyerId", lawyer_id)
}
