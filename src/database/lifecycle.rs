/**
 * Connection Lifecycle Manager
 *
 * Owns the single outbound connection to the document database: connects
 * with a bounded number of retries at startup, keeps the connection phase in
 * sync with events reported by the driver, answers readiness queries from
 * request handlers and closes the connection on shutdown.
 *
 * # Phases
 *
 * ```text
 * Disconnected --bootstrap--> Connecting --ok--------> Connected
 *                                  \--exhausted--> Disconnected
 * Connected --disconnect/error event--> Disconnected
 * ```
 *
 * # Failure Handling
 *
 * Nothing in this module returns an error to its callers. Failed attempts
 * are retried with a fixed delay and then logged; the only observable
 * failure signal is `is_ready()` returning `false`.
 */

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::database::connection::{
    Connection, ConnectionEvent, Connector, Delay, StateObserver, TokioDelay,
};

/// Endpoint used when `MONGODB_URI` is not configured
pub const DEFAULT_DATABASE_URI: &str = "mongodb://localhost:27017/nyaymitra";

/// Retries after the initial attempt when `MONGODB_CONNECT_RETRIES` is not configured
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Delay between attempts when `MONGODB_RETRY_DELAY_MS` is not configured
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(5000);

/// Connection phase as seen by the rest of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionPhase {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

/// Settings for the bootstrap sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Endpoint URI, read once at process start
    pub uri: String,
    /// Retries after the initial attempt; total attempts are `max_retries + 1`
    pub max_retries: u32,
    /// Fixed wait between attempts
    pub retry_delay: Duration,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_DATABASE_URI.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Point-in-time view of the connection, used by the health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub phase: ConnectionPhase,
    pub host: Option<String>,
    /// Only present while a bootstrap sequence is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries_remaining: Option<u32>,
}

/// State shared between the manager and the observers it registers on a
/// connection.
struct SharedState {
    phase: RwLock<ConnectionPhase>,
    host: RwLock<Option<String>>,
    /// Bumped whenever the current connection is replaced or closed so that
    /// observers of an older connection stop touching the phase.
    generation: AtomicU64,
}

impl SharedState {
    fn new() -> Self {
        Self {
            phase: RwLock::new(ConnectionPhase::Disconnected),
            host: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    fn phase(&self) -> Option<ConnectionPhase> {
        self.phase.read().ok().map(|phase| *phase)
    }

    fn set_phase(&self, phase: ConnectionPhase) {
        match self.phase.write() {
            Ok(mut guard) => *guard = phase,
            Err(poisoned) => *poisoned.into_inner() = phase,
        }
    }

    fn host(&self) -> Option<String> {
        self.host.read().ok().and_then(|host| host.clone())
    }

    fn set_host(&self, host: Option<String>) {
        match self.host.write() {
            Ok(mut guard) => *guard = host,
            Err(poisoned) => *poisoned.into_inner() = host,
        }
    }
}

/// Clears the in-flight flag when a bootstrap sequence ends, however it ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Supervises the single database connection
///
/// Construct one per process and share it through `Arc`:
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use nyaymitra::database::{ConnectionManager, DatabaseSettings, MongoConnector};
///
/// # async fn example() {
/// let manager = Arc::new(ConnectionManager::new(
///     DatabaseSettings::default(),
///     Arc::new(MongoConnector::default()),
/// ));
/// manager.bootstrap().await;
/// if manager.is_ready() {
///     // safe to touch persisted data
/// }
/// manager.shutdown().await;
/// # }
/// ```
pub struct ConnectionManager {
    settings: DatabaseSettings,
    connector: Arc<dyn Connector>,
    delay: Arc<dyn Delay>,
    state: Arc<SharedState>,
    in_flight: AtomicBool,
    /// Set by `shutdown()`; no connection is kept after this
    closing: AtomicBool,
    retries_remaining: AtomicU32,
    connection: Mutex<Option<Box<dyn Connection>>>,
}

impl ConnectionManager {
    /// Create a manager in the `Disconnected` phase
    ///
    /// No connection is attempted until `bootstrap()` is called.
    pub fn new(settings: DatabaseSettings, connector: Arc<dyn Connector>) -> Self {
        Self {
            retries_remaining: AtomicU32::new(settings.max_retries),
            settings,
            connector,
            delay: Arc::new(TokioDelay),
            state: Arc::new(SharedState::new()),
            in_flight: AtomicBool::new(false),
            closing: AtomicBool::new(false),
            connection: Mutex::new(None),
        }
    }

    /// Replace the timer used between attempts
    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    /// Connect to the database, retrying up to `max_retries` times
    ///
    /// Call once at process start before accepting requests. A call made
    /// while another sequence is running, while already connected, or after
    /// `shutdown()` does nothing. Failures are logged and never returned;
    /// when this resolves the phase is either `Connected` or `Disconnected`.
    pub async fn bootstrap(&self) {
        if self.closing.load(Ordering::SeqCst) {
            tracing::debug!("Database manager shut down; bootstrap skipped");
            return;
        }

        if self.is_ready() {
            tracing::debug!("Database already connected; bootstrap skipped");
            return;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Database bootstrap already in progress; skipping");
            return;
        }
        let _in_flight = InFlightGuard(&self.in_flight);

        // A sequence that finished between the readiness check and the guard
        if self.is_ready() {
            return;
        }

        self.state.generation.fetch_add(1, Ordering::SeqCst);
        self.retire_stale_connection().await;

        self.state.set_phase(ConnectionPhase::Connecting);
        self.retries_remaining
            .store(self.settings.max_retries, Ordering::SeqCst);

        let endpoint = redact_uri(&self.settings.uri);
        let mut attempt: u32 = 0;

        loop {
            if self.closing.load(Ordering::SeqCst) {
                tracing::info!("Shutdown requested; abandoning database bootstrap");
                self.state.set_phase(ConnectionPhase::Disconnected);
                return;
            }

            attempt += 1;
            tracing::debug!(attempt, endpoint = %endpoint, "Attempting database connection");

            match self.connector.connect(&self.settings.uri).await {
                Ok(connection) => {
                    self.establish(connection).await;
                    return;
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Database connection attempt failed");

                    let remaining = self.retries_remaining.load(Ordering::SeqCst);
                    if remaining == 0 {
                        tracing::error!(
                            attempts = attempt,
                            endpoint = %endpoint,
                            "Database connection failed after retries; continuing without database"
                        );
                        self.state.set_phase(ConnectionPhase::Disconnected);
                        return;
                    }

                    self.retries_remaining.store(remaining - 1, Ordering::SeqCst);
                    tracing::info!(
                        delay_ms = self.settings.retry_delay.as_millis() as u64,
                        retries_remaining = remaining - 1,
                        "Retrying database connection"
                    );
                    self.delay.sleep(self.settings.retry_delay).await;
                }
            }
        }
    }

    /// `true` iff the connection is currently established
    ///
    /// Never blocks on I/O and never panics; a failed lookup counts as not
    /// ready.
    pub fn is_ready(&self) -> bool {
        self.state.phase() == Some(ConnectionPhase::Connected)
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.state.phase().unwrap_or(ConnectionPhase::Disconnected)
    }

    /// Host recorded by the last successful bootstrap
    pub fn host(&self) -> Option<String> {
        self.state.host()
    }

    pub fn status(&self) -> ConnectionStatus {
        let phase = self.phase();
        ConnectionStatus {
            connected: phase == ConnectionPhase::Connected,
            phase,
            host: self.host(),
            retries_remaining: (phase == ConnectionPhase::Connecting)
                .then(|| self.retries_remaining.load(Ordering::SeqCst)),
        }
    }

    /// Close the connection if it is open
    ///
    /// Pending operations are allowed to finish. Safe to call repeatedly; a
    /// call with no open connection only logs. A bootstrap still running
    /// when this is called stops retrying, and a connection it opens late
    /// is closed instead of kept.
    pub async fn shutdown(&self) {
        self.closing.store(true, Ordering::SeqCst);

        let connection = self.connection.lock().await.take();

        let Some(connection) = connection else {
            tracing::debug!("No open database connection; nothing to close");
            return;
        };

        let was_connected = self.is_ready();
        self.state.generation.fetch_add(1, Ordering::SeqCst);
        self.state.set_phase(ConnectionPhase::Disconnected);

        if !was_connected {
            tracing::debug!("Database connection already lost; dropping handle");
            return;
        }

        match connection.close().await {
            Ok(()) => tracing::info!(host = %connection.host(), "Database connection closed"),
            Err(e) => tracing::error!(error = %e, "Error closing database connection"),
        }
    }

    async fn establish(&self, connection: Box<dyn Connection>) {
        let generation = self.state.generation.load(Ordering::SeqCst);
        let host = connection.host();

        let mut slot = self.connection.lock().await;

        // `shutdown()` sets the flag before taking the slot, so either it
        // finds this connection or this sees the flag
        if self.closing.load(Ordering::SeqCst) {
            drop(slot);
            tracing::info!(host = %host, "Shutdown requested; closing new database connection");
            if let Err(e) = connection.close().await {
                tracing::warn!(error = %e, "Failed to close database connection");
            }
            self.state.set_phase(ConnectionPhase::Disconnected);
            return;
        }

        self.state.set_host(Some(host.clone()));
        self.state.set_phase(ConnectionPhase::Connected);
        tracing::info!(host = %host, "Database connected");

        // Subscribed after the phase is set: a connection that already knows
        // its server is down reports that immediately
        connection.on_state_change(state_observer(self.state.clone(), generation));
        *slot = Some(connection);
    }

    /// Close a handle left behind by a connection that was lost after startup
    async fn retire_stale_connection(&self) {
        let stale = self.connection.lock().await.take();
        if let Some(stale) = stale {
            tracing::debug!(host = %stale.host(), "Closing stale database connection");
            if let Err(e) = stale.close().await {
                tracing::warn!(error = %e, "Failed to close stale database connection");
            }
        }
    }
}

/// Build the observer that keeps the phase in sync with one connection
fn state_observer(state: Arc<SharedState>, generation: u64) -> StateObserver {
    Arc::new(move |event: ConnectionEvent| {
        if state.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(?event, "Ignoring event from a replaced database connection");
            return;
        }

        match event {
            ConnectionEvent::Connected => {
                state.set_phase(ConnectionPhase::Connected);
                tracing::info!("Database connection event: connected");
            }
            ConnectionEvent::Disconnected => {
                state.set_phase(ConnectionPhase::Disconnected);
                tracing::warn!("Database connection event: disconnected");
            }
            ConnectionEvent::Error(message) => {
                state.set_phase(ConnectionPhase::Disconnected);
                tracing::error!(error = %message, "Database connection event: error");
            }
        }
    })
}

/// Hide credentials in a connection string before it is logged
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let authority_start = scheme_end + 3;
    let authority_end = uri[authority_start..]
        .find('/')
        .map(|i| authority_start + i)
        .unwrap_or(uri.len());

    match uri[authority_start..authority_end].rfind('@') {
        Some(at) => format!(
            "{}***{}",
            &uri[..authority_start],
            &uri[authority_start + at..]
        ),
        None => uri.to_string(),
    }
}
