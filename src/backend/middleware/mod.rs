//! Middleware Module
//!
//! - **`readiness`** - Answers 503 on persistence-backed routes while the
//!   database is not connected
//! - **`cors`** - Cross-origin resource sharing for browser clients

/// Database readiness guard
pub mod readiness;

/// CORS layer
pub mod cors;

pub use cors::cors_layer;
pub use readiness::require_database;
