//! Nyaymitra - Main Library
//!
//! Backend for the Nyaymitra legal-services application: an Axum HTTP API
//! for authentication, documents, users, lawyers and Q&A, backed by a single
//! supervised MongoDB connection.
//!
//! # Module Structure
//!
//! - **`database`** - MongoDB connection lifecycle
//!   - Bounded-retry bootstrap with a fixed delay
//!   - Readiness query for request handlers
//!   - Graceful shutdown
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum router, handlers and middleware
//!   - Configuration loading from the environment
//!   - Backend error types
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - HTTP server, CORS, request tracing and `.env` loading
//!
//! # Usage
//!
//! ```rust,no_run
//! use nyaymitra::backend::server::{build_connection_manager, create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let database = build_connection_manager(&config);
//! let app = create_app(&config, database.clone()).await;
//! // Serve `app` with axum, then on shutdown:
//! database.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! The database layer never surfaces connection errors to callers; it
//! reports readiness instead. HTTP handlers translate "not ready" into
//! `503 Service Unavailable` through `backend::error::BackendError`.

/// MongoDB connection lifecycle
pub mod database;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
