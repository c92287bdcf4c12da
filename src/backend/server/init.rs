/**
 * Server Initialization
 *
 * This module handles the initialization of the Axum HTTP server: creating
 * the connection manager, bootstrapping the database and assembling the
 * router.
 *
 * # Initialization Process
 *
 * 1. Build the `ConnectionManager` from configuration
 * 2. Bootstrap the database connection (bounded retries, never fails)
 * 3. Create `AppState`
 * 4. Create and configure the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::database::{ConnectionManager, MongoConnector};

/// Build the MongoDB-backed connection manager for `config`
pub fn build_connection_manager(config: &ServerConfig) -> Arc<ConnectionManager> {
    Arc::new(ConnectionManager::new(
        config.database.clone(),
        Arc::new(MongoConnector::default()),
    ))
}

/// Create and configure the Axum application
///
/// Runs the database bootstrap before returning, so the router is only
/// handed out once the connection is either established or given up on.
///
/// # Error Handling
///
/// The function does not fail: if the database cannot be reached after all
/// retries, the server still starts and persistence-backed routes answer
/// `503` until a connection is available.
pub async fn create_app(config: &ServerConfig, database: Arc<ConnectionManager>) -> Router {
    tracing::info!(
        environment = %config.environment,
        max_retries = config.database.max_retries,
        "Initializing Nyaymitra backend server"
    );

    database.bootstrap().await;

    if database.is_ready() {
        tracing::info!("Database ready");
    } else {
        tracing::warn!("Starting without database; data routes will answer 503");
    }

    let app_state = AppState::new(database, config.environment.clone());
    let app = create_router(app_state);

    tracing::info!("Router configured");

    app
}
