/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The shared `ConnectionManager` (readiness checks, health output)
 * - The deployment environment name
 *
 * The manager is created by the server supervisor and injected here; nothing
 * reaches it through global state.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::database::ConnectionManager;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Supervisor of the MongoDB connection
    pub database: Arc<ConnectionManager>,

    /// Deployment environment name, reported by the health endpoint
    pub environment: String,
}

impl AppState {
    pub fn new(database: Arc<ConnectionManager>, environment: impl Into<String>) -> Self {
        Self {
            database,
            environment: environment.into(),
        }
    }
}

/// Implement FromRef for the connection manager
///
/// This allows handlers and middleware to extract
/// `State<Arc<ConnectionManager>>` directly from `AppState`.
impl FromRef<AppState> for Arc<ConnectionManager> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.database.clone()
    }
}
