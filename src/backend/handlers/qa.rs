/**
 * Q&A Handlers
 *
 * Frequently asked questions and user-submitted legal questions.
 *
 * # Routes
 *
 * - `GET /api/qa/faqs`
 * - `GET /api/qa/search`
 * - `GET /api/qa/categories`
 * - `POST /api/qa/submit-question`
 */

use crate::backend::handlers::types::EndpointResponse;

pub async fn list_faqs() -> EndpointResponse {
    EndpointResponse::new("Get FAQs endpoint working").with_empty_list("faqs")
}

pub async fn search_faqs() -> EndpointResponse {
    EndpointResponse::new("Search FAQs endpoint working").with_empty_list("results")
}

pub async fn list_categories() -> EndpointResponse {
    EndpointResponse::new("Get FAQ categories endpoint working").with_empty_list("categories")
}

pub async fn submit_question() -> EndpointResponse {
    EndpointResponse::new("Submit question endpoint working")
}
