//! Database test doubles
//!
//! `FakeConnector` stands in for the MongoDB driver. It counts attempts,
//! fails until a configured attempt number, can hold an attempt open until
//! the test releases it, and lets the test emit driver events on any
//! connection it handed out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tokio::sync::Notify;

use nyaymitra::database::{
    Connection, ConnectionEvent, ConnectionManager, Connector, DatabaseError, DatabaseSettings,
    Delay, StateObserver,
};

pub const FAKE_HOST: &str = "fake-host:27017";

/// Shared state of one connection handed out by `FakeConnector`
#[derive(Default)]
pub struct FakeConnectionState {
    observers: Mutex<Vec<StateObserver>>,
    closes: AtomicUsize,
    /// Delivered to each observer as it subscribes
    current: Option<ConnectionEvent>,
}

impl FakeConnectionState {
    /// Deliver a driver event to every observer of this connection
    pub fn emit(&self, event: ConnectionEvent) {
        let observers = self.observers.lock().unwrap().clone();
        for observer in observers {
            observer(event.clone());
        }
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.lock().unwrap().len()
    }
}

struct FakeConnection {
    state: Arc<FakeConnectionState>,
}

#[async_trait]
impl Connection for FakeConnection {
    fn host(&self) -> String {
        FAKE_HOST.to_string()
    }

    fn on_state_change(&self, observer: StateObserver) {
        if let Some(event) = &self.state.current {
            observer(event.clone());
        }
        self.state.observers.lock().unwrap().push(observer);
    }

    async fn close(&self) -> Result<(), DatabaseError> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Scripted `Connector`
pub struct FakeConnector {
    /// 1-based attempt number that succeeds; `None` fails forever
    succeed_on: Option<usize>,
    attempts: AtomicUsize,
    gate: Option<Notify>,
    report_on_subscribe: Option<ConnectionEvent>,
    connections: Mutex<Vec<Arc<FakeConnectionState>>>,
}

impl FakeConnector {
    pub fn always_failing() -> Self {
        Self {
            succeed_on: None,
            attempts: AtomicUsize::new(0),
            gate: None,
            report_on_subscribe: None,
            connections: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding_on(attempt: usize) -> Self {
        Self {
            succeed_on: Some(attempt),
            ..Self::always_failing()
        }
    }

    /// Hold every attempt until `release()` is called
    pub fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    /// Connections already know their server is down when observed
    pub fn down_on_subscribe(mut self) -> Self {
        self.report_on_subscribe = Some(ConnectionEvent::Error("heartbeat failed".to_string()));
        self
    }

    /// Let one held attempt proceed
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Yield until at least `count` attempts have started
    pub async fn wait_for_attempts(&self, count: usize) {
        while self.attempts() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Connection handed out by the `index`-th successful attempt
    pub fn connection(&self, index: usize) -> Arc<FakeConnectionState> {
        self.connections.lock().unwrap()[index].clone()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().unwrap().len()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, _uri: &str) -> Result<Box<dyn Connection>, DatabaseError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.succeed_on {
            Some(n) if attempt >= n => {
                let state = Arc::new(FakeConnectionState {
                    current: self.report_on_subscribe.clone(),
                    ..FakeConnectionState::default()
                });
                self.connections.lock().unwrap().push(state.clone());
                Ok(Box::new(FakeConnection { state }))
            }
            _ => Err(DatabaseError::connect(format!(
                "connection refused (attempt {})",
                attempt
            ))),
        }
    }
}

/// `Delay` that returns immediately and records what it was asked to wait
#[derive(Default)]
pub struct RecordingDelay {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Delay for RecordingDelay {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.sleeps.lock().unwrap().push(duration);
        Box::pin(async {})
    }
}

/// `Delay` that waits until the test calls `resume()`
#[derive(Default)]
pub struct PausingDelay {
    calls: AtomicUsize,
    resume: Arc<Notify>,
}

impl PausingDelay {
    pub fn resume(&self) {
        self.resume.notify_one();
    }

    /// Yield until at least `count` sleeps have started
    pub async fn wait_for_sleeps(&self, count: usize) {
        while self.calls.load(Ordering::SeqCst) < count {
            tokio::task::yield_now().await;
        }
    }
}

impl Delay for PausingDelay {
    fn sleep(&self, _duration: Duration) -> BoxFuture<'static, ()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let resume = self.resume.clone();
        Box::pin(async move { resume.notified().await })
    }
}

pub fn settings(max_retries: u32, retry_delay: Duration) -> DatabaseSettings {
    DatabaseSettings {
        uri: "mongodb://fake-host:27017/nyaymitra_test".to_string(),
        max_retries,
        retry_delay,
    }
}

/// Manager wired to `connector` whose retry delay does not actually wait
pub fn instant_manager(
    connector: Arc<FakeConnector>,
    max_retries: u32,
) -> (ConnectionManager, Arc<RecordingDelay>) {
    let delay = Arc::new(RecordingDelay::default());
    let manager = ConnectionManager::new(settings(max_retries, Duration::from_millis(5000)), connector)
        .with_delay(delay.clone());
    (manager, delay)
}

/// Manager that is already connected through a `FakeConnector`
pub async fn connected_manager() -> (Arc<ConnectionManager>, Arc<FakeConnector>) {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 0);
    let manager = Arc::new(manager);
    manager.bootstrap().await;
    assert!(manager.is_ready());
    (manager, connector)
}

/// Manager whose bootstrap has given up
pub async fn disconnected_manager() -> Arc<ConnectionManager> {
    let connector = Arc::new(FakeConnector::always_failing());
    let (manager, _) = instant_manager(connector, 0);
    let manager = Arc::new(manager);
    manager.bootstrap().await;
    assert!(!manager.is_ready());
    manager
}
