/**
 * Nyaymitra Server Entry Point
 *
 * Process supervisor for the backend: loads configuration, bootstraps the
 * database connection, serves HTTP and closes the connection when SIGINT or
 * SIGTERM arrives.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use nyaymitra::backend::server::{build_connection_manager, create_app, ServerConfig};

    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let database = build_connection_manager(&config);
    let app = create_app(&config, database.clone()).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(database, config.should_exit_after_close()))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves once SIGINT or SIGTERM arrives, after closing the database
#[cfg(feature = "ssr")]
async fn shutdown_signal(
    database: std::sync::Arc<nyaymitra::database::ConnectionManager>,
    exit_after_close: bool,
) {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    database.shutdown().await;

    if exit_after_close {
        tracing::info!("FORCE_EXIT_ON_DB_CLOSE set; exiting");
        std::process::exit(0);
    }

    tracing::info!("Draining in-flight requests");
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin nyaymitra-server --features ssr");
    std::process::exit(1);
}
