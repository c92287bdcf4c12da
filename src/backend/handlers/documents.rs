/**
 * Document Handlers
 *
 * Handlers for the `/api/documents` routes. Document storage is not implemented;
 * listings are empty and per-document endpoints echo the requested ID.
 *
 * # Routes
 *
 * - `POST /api/documents/upload`
 * - `GET /api/documents`
 * - `GET|PUT|DELETE /api/documents/{document_id}`
 */

use axum::extract::Path;

use crate::backend::handlers::types::EndpointResponse;

pub async fn upload_document() -> EndpointResponse {
    EndpointResponse::new("Document upload endpoint working")
}

pub async fn list_documents() -> EndpointResponse {
    EndpointResponse::new("Get documents endpoint working").with_empty_list("documents")
}

pub async fn get_document(Path(document_id): Path<String>) -> EndpointResponse {
    EndpointResponse::new("Get document by ID endpoint working").with("documentId", document_id)
}

pub async fn update_document(Path(document_id): Path<String>) -> EndpointResponse {
    EndpointResponse::new("Update document endpoint working").with("documentId", document_id)
}

pub async fn delete_document(Path(document_id): Path<String>) -> EndpointResponse {
    EndpointResponse::new("Delete document endpoint working").with("documentId", document_id)
}
