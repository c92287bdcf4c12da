/**
 * Connection Seams
 *
 * This module defines the traits the lifecycle manager talks to instead of a
 * concrete driver, so the retry and state-tracking logic can run against a
 * fake connection in tests.
 *
 * - `Connector` opens a connection to an endpoint URI
 * - `Connection` is an open handle that reports state changes and can be closed
 * - `Delay` suspends the retry loop between attempts
 */

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::database::error::DatabaseError;

/// State change reported asynchronously by the driver for an open connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The driver (re)established contact with the server
    Connected,
    /// The driver lost contact with the server or the connection was closed
    Disconnected,
    /// The driver reported an error on the connection
    Error(String),
}

/// Callback invoked for every `ConnectionEvent` on a connection
pub type StateObserver = Arc<dyn Fn(ConnectionEvent) + Send + Sync>;

/// An open connection to the document database
#[async_trait]
pub trait Connection: Send + Sync {
    /// Host the connection resolved to, for logging and health output
    fn host(&self) -> String;

    /// Subscribe to asynchronous state changes of this connection
    ///
    /// Observers stay registered for the lifetime of the connection.
    fn on_state_change(&self, observer: StateObserver);

    /// Close the connection, letting pending operations finish
    async fn close(&self) -> Result<(), DatabaseError>;
}

/// Opens connections to the document database
#[async_trait]
pub trait Connector: Send + Sync {
    /// Make a single connection attempt against `uri`
    async fn connect(&self, uri: &str) -> Result<Box<dyn Connection>, DatabaseError>;
}

/// Suspends the current task between bootstrap attempts
pub trait Delay: Send + Sync {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// `Delay` backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
