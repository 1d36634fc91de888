//! Keep-alive loop tests on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use pi_shutdown::config::MonitorConfig;
use pi_shutdown::gpio::{PinId, SimulatedEdgeSource};
use pi_shutdown::lifecycle::Shutdown;
use pi_shutdown::monitor::ButtonMonitor;
use pi_shutdown::power::PowerAction;

mod common;

use common::RecordingRunner;

#[tokio::test(start_paused = true)]
async fn test_idle_loop_never_issues_commands() {
    let config = MonitorConfig::default();
    let source = SimulatedEdgeSource::new();
    let runner = Arc::new(RecordingRunner::default());
    let monitor = ButtonMonitor::initialize(source, &config.buttons, runner.clone()).unwrap();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(monitor.run(config.runtime.keepalive(), shutdown.subscribe()));

    // 100 keep-alive cycles with no edges.
    tokio::time::sleep(config.runtime.keepalive() * 100 + Duration::from_millis(250)).await;

    assert!(!handle.is_finished());
    assert!(runner.issued().is_empty());

    shutdown.trigger("test");
    let cycles = handle.await.unwrap();
    assert_eq!(cycles, 100);
}

#[tokio::test(start_paused = true)]
async fn test_presses_delivered_while_running() {
    let config = MonitorConfig::default();
    let source = SimulatedEdgeSource::new();
    let runner = Arc::new(RecordingRunner::default());
    let monitor =
        ButtonMonitor::initialize(source.clone(), &config.buttons, runner.clone()).unwrap();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(monitor.run(config.runtime.keepalive(), shutdown.subscribe()));

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(source.falling_edge(PinId(24)));
    assert!(!handle.is_finished());

    shutdown.trigger("test");
    handle.await.unwrap();

    assert_eq!(runner.issued(), vec![PowerAction::Reboot]);
}

#[tokio::test]
async fn test_dropped_coordinator_stops_loop() {
    let config = MonitorConfig::default();
    let runner = Arc::new(RecordingRunner::default());
    let monitor =
        ButtonMonitor::initialize(SimulatedEdgeSource::new(), &config.buttons, runner).unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    drop(shutdown);

    let cycles = monitor.run(Duration::from_millis(500), rx).await;
    assert_eq!(cycles, 0);
}
