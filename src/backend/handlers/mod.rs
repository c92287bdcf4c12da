//! Handlers Module
//!
//! Request handlers grouped by resource.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Shared response types
//! ├── health.rs     - /api and /api/health
//! ├── auth.rs       - /api/auth/*
//! ├── documents.rs  - /api/documents/*
//! ├── users.rs      - /api/users/*
//! ├── lawyers.rs    - /api/lawyers/*
//! ├── qa.rs         - /api/qa/*
//! └── fallback.rs   - 404 and 405 responses
//! ```

/// Shared response types
pub mod types;

/// Health check and API index
pub mod health;

/// Authentication endpoints
pub mod auth;

/// Document endpoints
pub mod documents;

/// User endpoints
pub mod users;

/// Lawyer directory endpoints
pub mod lawyers;

/// Q&A endpoints
pub mod qa;

/// Not found / method not allowed
pub mod fallback;

pub use types::{EndpointInfo, EndpointResponse, HealthResponse};
