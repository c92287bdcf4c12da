/**
 * User Handlers
 *
 * # Routes
 *
 * - `GET /api/users/profile`
 * - `PUT /api/users/profile`
 * - `POST /api/users/logout`
 */

use crate::backend::handlers::types::EndpointResponse;

pub async fn get_profile() -> EndpointResponse {
    EndpointResponse::new("Get user profile endpoint working")
}

pub async fn update_profile() -> EndpointResponse {
    EndpointResponse::new("Update user profile endpoint working")
}

pub async fn logout() -> EndpointResponse {
    EndpointResponse::new("User logout endpoint working")
}
