/**
 * MongoDB Connector
 *
 * `Connector` implementation backed by the official `mongodb` driver.
 *
 * # Connection Attempt
 *
 * 1. Parse the URI into `ClientOptions`
 * 2. Bound server selection and socket connect to a few seconds so an
 *    unreachable server fails the attempt instead of hanging it
 * 3. Install an SDAM event handler that forwards driver state changes to
 *    the observers subscribed on the connection
 * 4. Verify the server with `ping` on the `admin` database
 *
 * # Event Mapping
 *
 * Heartbeat outcomes are tracked per server address. The connection as a
 * whole is:
 *
 * - up (`ConnectionEvent::Connected`) while any server answers heartbeats
 * - down (`ConnectionEvent::Error`) once every known server has failed
 * - closed (`ConnectionEvent::Disconnected`) after the topology is closed
 *
 * A failing secondary next to a healthy primary does not count as a lost
 * connection. Heartbeats repeat every few seconds, so only transitions are
 * forwarded, and an observer subscribing while the connection is down is
 * told so immediately.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::event::sdam::SdamEvent;
use mongodb::event::EventHandler;
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::database::connection::{Connection, ConnectionEvent, Connector, StateObserver};
use crate::database::error::DatabaseError;

const DEFAULT_SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens MongoDB connections
#[derive(Debug, Clone)]
pub struct MongoConnector {
    server_selection_timeout: Duration,
    connect_timeout: Duration,
}

impl Default for MongoConnector {
    fn default() -> Self {
        Self {
            server_selection_timeout: DEFAULT_SERVER_SELECTION_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl MongoConnector {
    pub fn with_timeouts(server_selection_timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            server_selection_timeout,
            connect_timeout,
        }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    async fn connect(&self, uri: &str) -> Result<Box<dyn Connection>, DatabaseError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| DatabaseError::invalid_uri(e.to_string()))?;

        options.server_selection_timeout = Some(self.server_selection_timeout);
        options.connect_timeout = Some(self.connect_timeout);

        let events = Arc::new(EventForwarder::default());
        let forwarder = events.clone();
        options.sdam_event_handler = Some(EventHandler::callback(move |event: SdamEvent| {
            if let Some(update) = server_update(&event) {
                forwarder.record(update);
            }
        }));

        let host = options
            .hosts
            .first()
            .map(|address| address.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let client = Client::with_options(options)
            .map_err(|e| DatabaseError::connect(e.to_string()))?;

        // The driver connects lazily; ping forces server selection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DatabaseError::ping(e.to_string()))?;

        Ok(Box::new(MongoConnection {
            client,
            host,
            events,
        }))
    }
}

/// An open MongoDB client
pub struct MongoConnection {
    client: Client,
    host: String,
    events: Arc<EventForwarder>,
}

impl MongoConnection {
    /// Get the raw MongoDB client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Connection for MongoConnection {
    fn host(&self) -> String {
        self.host.clone()
    }

    fn on_state_change(&self, observer: StateObserver) {
        self.events.subscribe(observer);
    }

    async fn close(&self) -> Result<(), DatabaseError> {
        // Non-immediate shutdown waits for in-flight operations
        self.client.clone().shutdown().await;
        Ok(())
    }
}

/// Health change of one server, as reported by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
enum ServerUpdate {
    Healthy(String),
    Failed { address: String, error: String },
    Removed(String),
    TopologyClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Health {
    /// No heartbeat seen yet
    #[default]
    Unknown,
    Up,
    Down,
}

#[derive(Default)]
struct ForwarderState {
    observers: Vec<StateObserver>,
    /// Last heartbeat outcome per server address
    servers: HashMap<String, bool>,
    health: Health,
    closed: bool,
    last_error: Option<String>,
}

impl ForwarderState {
    fn aggregate(&self) -> Health {
        if self.closed {
            Health::Down
        } else if self.servers.values().any(|up| *up) {
            Health::Up
        } else if self.servers.is_empty() {
            Health::Unknown
        } else {
            Health::Down
        }
    }

    fn event(&self) -> Option<ConnectionEvent> {
        match self.health {
            Health::Unknown => None,
            Health::Up => Some(ConnectionEvent::Connected),
            Health::Down if self.closed => Some(ConnectionEvent::Disconnected),
            Health::Down => Some(ConnectionEvent::Error(
                self.last_error
                    .clone()
                    .unwrap_or_else(|| "no reachable server".to_string()),
            )),
        }
    }
}

/// Folds per-server driver events into connection health and fans the
/// transitions out to subscribed observers
///
/// Observers run under the lock so they see transitions in order.
#[derive(Default)]
struct EventForwarder {
    state: Mutex<ForwarderState>,
}

impl EventForwarder {
    fn lock(&self) -> MutexGuard<'_, ForwarderState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn subscribe(&self, observer: StateObserver) {
        let mut state = self.lock();
        if state.health == Health::Down {
            if let Some(event) = state.event() {
                observer(event);
            }
        }
        state.observers.push(observer);
    }

    fn record(&self, update: ServerUpdate) {
        let mut state = self.lock();
        match update {
            ServerUpdate::Healthy(address) => {
                state.servers.insert(address, true);
            }
            ServerUpdate::Failed { address, error } => {
                state.servers.insert(address, false);
                state.last_error = Some(error);
            }
            ServerUpdate::Removed(address) => {
                state.servers.remove(&address);
            }
            ServerUpdate::TopologyClosed => state.closed = true,
        }

        let health = state.aggregate();
        if health == state.health {
            return;
        }
        state.health = health;

        if let Some(event) = state.event() {
            for observer in &state.observers {
                observer(event.clone());
            }
        }
    }
}

fn server_update(event: &SdamEvent) -> Option<ServerUpdate> {
    match event {
        SdamEvent::ServerHeartbeatSucceeded(succeeded) => {
            Some(ServerUpdate::Healthy(succeeded.server_address.to_string()))
        }
        SdamEvent::ServerHeartbeatFailed(failed) => Some(ServerUpdate::Failed {
            address: failed.server_address.to_string(),
            error: failed.failure.to_string(),
        }),
        SdamEvent::ServerClosed(closed) => Some(ServerUpdate::Removed(closed.address.to_string())),
        SdamEvent::TopologyClosed(_) => Some(ServerUpdate::TopologyClosed),
        _ => None,
    }
}
