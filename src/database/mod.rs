//! Database Module
//!
//! This module owns the application's single connection to MongoDB.
//!
//! # Architecture
//!
//! - **`lifecycle`** - `ConnectionManager`: bounded-retry bootstrap, readiness
//!   query, graceful shutdown
//! - **`connection`** - `Connector` / `Connection` / `Delay` seams the manager
//!   is written against
//! - **`mongo`** - `Connector` implementation for the `mongodb` driver
//! - **`error`** - `DatabaseError`
//!
//! # Module Structure
//!
//! ```text
//! database/
//! ├── mod.rs         - Module exports and documentation
//! ├── lifecycle.rs   - Connection lifecycle manager
//! ├── connection.rs  - Connector, connection and delay traits
//! ├── mongo.rs       - MongoDB driver adapter
//! └── error.rs       - Error types
//! ```
//!
//! # Usage
//!
//! The server creates one `ConnectionManager`, runs `bootstrap()` before it
//! starts listening, stores the manager in `AppState`, and calls `shutdown()`
//! when it receives a termination signal. Handlers that need persisted data
//! check `is_ready()` first.

/// Connection lifecycle manager
pub mod lifecycle;

/// Connector and connection traits
pub mod connection;

/// MongoDB driver adapter
pub mod mongo;

/// Database error types
pub mod error;

pub use connection::{Connection, ConnectionEvent, Connector, Delay, StateObserver, TokioDelay};
pub use error::DatabaseError;
pub use lifecycle::{
    ConnectionManager, ConnectionPhase, ConnectionStatus, DatabaseSettings, DEFAULT_DATABASE_URI,
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, redact_uri,
};
pub use mongo::{MongoConnection, MongoConnector};
