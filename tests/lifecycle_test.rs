//! Connection lifecycle tests
//!
//! Exercises `ConnectionManager` against the in-memory connector: retry
//! bounds, the in-flight guard, event-driven phase changes and shutdown.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use common::{instant_manager, settings, FakeConnector, PausingDelay, FAKE_HOST};
use nyaymitra::database::{ConnectionEvent, ConnectionManager, ConnectionPhase};

#[tokio::test]
async fn test_not_ready_before_bootstrap() {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 5);

    assert!(!manager.is_ready());
    assert_eq!(manager.phase(), ConnectionPhase::Disconnected);
    assert_eq!(manager.host(), None);
    assert_eq!(connector.attempts(), 0);
}

#[tokio::test]
async fn test_permanent_failure_makes_max_retries_plus_one_attempts() {
    for max_retries in [0u32, 1, 3, 5] {
        let connector = Arc::new(FakeConnector::always_failing());
        let (manager, delay) = instant_manager(connector.clone(), max_retries);

        manager.bootstrap().await;

        assert_eq!(connector.attempts(), max_retries as usize + 1);
        assert_eq!(manager.phase(), ConnectionPhase::Disconnected);
        assert!(!manager.is_ready());
        assert_eq!(
            delay.sleeps(),
            vec![Duration::from_millis(5000); max_retries as usize]
        );
    }
}

#[tokio::test]
async fn test_exhausted_retries_wait_between_attempts() {
    let connector = Arc::new(FakeConnector::always_failing());
    let manager = ConnectionManager::new(settings(2, Duration::from_millis(10)), connector.clone());

    let started = Instant::now();
    manager.bootstrap().await;

    assert!(started.elapsed() >= Duration::from_millis(20));
    assert!(!manager.is_ready());
    assert_eq!(connector.attempts(), 3);
}

#[tokio::test]
async fn test_success_on_third_attempt() {
    let connector = Arc::new(FakeConnector::succeeding_on(3));
    let (manager, delay) = instant_manager(connector.clone(), 5);

    manager.bootstrap().await;

    assert!(manager.is_ready());
    assert_eq!(connector.attempts(), 3);
    assert_eq!(delay.sleeps().len(), 2);
    assert_eq!(manager.host().as_deref(), Some(FAKE_HOST));
    assert_eq!(connector.connection(0).observer_count(), 1);
}

#[tokio::test]
async fn test_bootstrap_when_connected_is_noop() {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 5);

    manager.bootstrap().await;
    manager.bootstrap().await;

    assert!(manager.is_ready());
    assert_eq!(connector.attempts(), 1);
    assert_eq!(connector.connection_count(), 1);
}

#[tokio::test]
async fn test_concurrent_bootstrap_is_noop_while_connecting() {
    let connector = Arc::new(FakeConnector::succeeding_on(1).gated());
    let (manager, _) = instant_manager(connector.clone(), 5);
    let manager = Arc::new(manager);

    let first = tokio::spawn({
        let manager = manager.clone();
        async move { manager.bootstrap().await }
    });

    connector.wait_for_attempts(1).await;
    assert_eq!(manager.phase(), ConnectionPhase::Connecting);
    assert!(!manager.is_ready());
    assert_eq!(manager.status().retries_remaining, Some(5));

    manager.bootstrap().await;
    assert_eq!(connector.attempts(), 1);

    connector.release();
    first.await.unwrap();

    assert!(manager.is_ready());
    assert_eq!(connector.attempts(), 1);
    assert_eq!(manager.status().retries_remaining, None);
}

#[tokio::test]
async fn test_disconnect_event_clears_readiness() {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 5);
    manager.bootstrap().await;
    assert!(manager.is_ready());

    connector.connection(0).emit(ConnectionEvent::Disconnected);

    assert!(!manager.is_ready());
    assert_eq!(manager.phase(), ConnectionPhase::Disconnected);
    // No automatic reconnect
    assert_eq!(connector.attempts(), 1);
}

#[tokio::test]
async fn test_error_event_clears_readiness_and_connected_event_restores_it() {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 5);
    manager.bootstrap().await;

    let connection = connector.connection(0);
    connection.emit(ConnectionEvent::Error("heartbeat failed".to_string()));
    assert!(!manager.is_ready());

    connection.emit(ConnectionEvent::Connected);
    assert!(manager.is_ready());
}

#[tokio::test]
async fn test_rebootstrap_after_disconnect_replaces_connection() {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 5);
    manager.bootstrap().await;

    let stale = connector.connection(0);
    stale.emit(ConnectionEvent::Disconnected);
    manager.bootstrap().await;

    assert!(manager.is_ready());
    assert_eq!(connector.attempts(), 2);
    assert_eq!(stale.closes(), 1);

    // Events from the replaced connection no longer move the phase
    stale.emit(ConnectionEvent::Disconnected);
    assert!(manager.is_ready());

    connector.connection(1).emit(ConnectionEvent::Disconnected);
    assert!(!manager.is_ready());
}

#[tokio::test]
async fn test_shutdown_closes_once() {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 5);
    manager.bootstrap().await;

    manager.shutdown().await;
    manager.shutdown().await;

    let connection = connector.connection(0);
    assert_eq!(connection.closes(), 1);
    assert!(!manager.is_ready());

    // Late driver events after close are ignored
    connection.emit(ConnectionEvent::Connected);
    assert!(!manager.is_ready());
}

#[tokio::test]
async fn test_shutdown_without_connection_is_noop() {
    let connector = Arc::new(FakeConnector::always_failing());
    let (manager, _) = instant_manager(connector.clone(), 1);

    manager.shutdown().await;
    manager.bootstrap().await;
    manager.shutdown().await;

    assert!(!manager.is_ready());
    assert_eq!(connector.connection_count(), 0);
}

#[tokio::test]
async fn test_shutdown_after_lost_connection_skips_close() {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 5);
    manager.bootstrap().await;

    connector.connection(0).emit(ConnectionEvent::Disconnected);
    manager.shutdown().await;

    assert_eq!(connector.connection(0).closes(), 0);
    assert!(!manager.is_ready());
}

#[tokio::test]
async fn test_status_reports_host_and_phase() {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 5);
    manager.bootstrap().await;

    let status = manager.status();
    assert!(status.connected);
    assert_eq!(status.phase, ConnectionPhase::Connected);
    assert_eq!(status.host.as_deref(), Some(FAKE_HOST));
    assert_eq!(status.retries_remaining, None);
}

#[tokio::test]
async fn test_connection_already_down_when_observed() {
    let connector = Arc::new(FakeConnector::succeeding_on(1).down_on_subscribe());
    let (manager, _) = instant_manager(connector.clone(), 5);

    manager.bootstrap().await;

    assert!(!manager.is_ready());
    assert_eq!(manager.phase(), ConnectionPhase::Disconnected);
    assert_eq!(connector.attempts(), 1);
}

#[tokio::test]
async fn test_retries_remaining_counts_down_before_each_wait() {
    let connector = Arc::new(FakeConnector::always_failing());
    let delay = Arc::new(PausingDelay::default());
    let manager = Arc::new(
        ConnectionManager::new(settings(2, Duration::from_millis(5000)), connector.clone())
            .with_delay(delay.clone()),
    );

    let bootstrap = tokio::spawn({
        let manager = manager.clone();
        async move { manager.bootstrap().await }
    });

    delay.wait_for_sleeps(1).await;
    assert_eq!(manager.status().retries_remaining, Some(1));
    delay.resume();

    delay.wait_for_sleeps(2).await;
    assert_eq!(manager.status().retries_remaining, Some(0));
    delay.resume();

    bootstrap.await.unwrap();
    assert_eq!(connector.attempts(), 3);
    assert_eq!(manager.status().retries_remaining, None);
}

#[tokio::test]
async fn test_shutdown_during_connect_closes_late_connection() {
    let connector = Arc::new(FakeConnector::succeeding_on(1).gated());
    let (manager, _) = instant_manager(connector.clone(), 5);
    let manager = Arc::new(manager);

    let bootstrap = tokio::spawn({
        let manager = manager.clone();
        async move { manager.bootstrap().await }
    });

    connector.wait_for_attempts(1).await;
    manager.shutdown().await;
    connector.release();
    bootstrap.await.unwrap();

    assert!(!manager.is_ready());
    assert_eq!(manager.phase(), ConnectionPhase::Disconnected);
    assert_eq!(connector.connection(0).closes(), 1);
}

#[tokio::test]
async fn test_shutdown_during_retry_wait_stops_retrying() {
    let connector = Arc::new(FakeConnector::always_failing());
    let delay = Arc::new(PausingDelay::default());
    let manager = Arc::new(
        ConnectionManager::new(settings(5, Duration::from_millis(5000)), connector.clone())
            .with_delay(delay.clone()),
    );

    let bootstrap = tokio::spawn({
        let manager = manager.clone();
        async move { manager.bootstrap().await }
    });

    delay.wait_for_sleeps(1).await;
    manager.shutdown().await;
    delay.resume();
    bootstrap.await.unwrap();

    assert_eq!(connector.attempts(), 1);
    assert_eq!(manager.phase(), ConnectionPhase::Disconnected);
}

#[tokio::test]
async fn test_bootstrap_after_shutdown_is_noop() {
    let connector = Arc::new(FakeConnector::succeeding_on(1));
    let (manager, _) = instant_manager(connector.clone(), 5);

    manager.shutdown().await;
    manager.bootstrap().await;

    assert!(!manager.is_ready());
    assert_eq!(connector.attempts(), 0);
}
