//! Backend Module
//!
//! This module contains all server-side code for the Nyaymitra API.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly and the public endpoint table
//! - **`handlers`** - Endpoint handlers (health, auth, documents, users, lawyers, Q&A)
//! - **`middleware`** - Database readiness guard and CORS
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Configuration, state and initialization
//! ├── routes/         - Route configuration
//! ├── handlers/       - Request handlers
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` carries the shared `ConnectionManager` and the environment
//! name. Handlers that need persisted data sit behind the readiness guard,
//! which answers `503` while the database is not connected.
//!
//! # Error Handling
//!
//! Handlers return `BackendError`, which converts to a JSON response:
//!
//! ```json
//! { "success": false, "error": "Database unavailable", "status": 503 }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Request handlers
pub mod handlers;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
