//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router assembly and layers
//! └── api_routes.rs   - Resource routes and the endpoint table
//! ```
//!
//! # Route Groups
//!
//! - `/api`, `/api/health` - always available
//! - `/api/auth`, `/api/documents`, `/api/users`, `/api/lawyers`, `/api/qa` -
//!   require a connected database

/// Main router creation
pub mod router;

/// Resource routes
pub mod api_routes;

pub use api_routes::API_ENDPOINTS;
pub use router::create_router;
