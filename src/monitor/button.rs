//! The shutdown/reboot button monitor.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use crate::config::schema::ButtonsConfig;
use crate::gpio::types::{ConfigurationError, EdgeHandler, EdgeSource, PinId};
use crate::observability::logging::NOTICE_TARGET;
use crate::power::{CommandRunner, PowerAction};

/// Binds two pins to the shutdown and reboot commands.
///
/// Owns the edge source, so the registrations live exactly as long as the
/// monitor does.
pub struct ButtonMonitor<S: EdgeSource> {
    source: S,
    shutdown_pin: PinId,
    reboot_pin: PinId,
    debounce: Duration,
}

impl<S: EdgeSource> ButtonMonitor<S> {
    /// Claim both pins and register their falling-edge handlers.
    ///
    /// Pin numbers are checked before anything is registered. On error the
    /// source is dropped together with any registration it already holds.
    pub fn initialize(
        mut source: S,
        buttons: &ButtonsConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self, ConfigurationError> {
        let shutdown_pin = buttons.shutdown_pin();
        let reboot_pin = buttons.reboot_pin();
        let debounce = buttons.debounce();

        if shutdown_pin == reboot_pin {
            return Err(ConfigurationError::DuplicatePin { pin: shutdown_pin });
        }
        for pin in [shutdown_pin, reboot_pin] {
            if !pin.is_valid() {
                return Err(ConfigurationError::InvalidPin { pin });
            }
        }

        source.watch_falling_edge(shutdown_pin, debounce, shutdown_handler(runner.clone()))?;
        source.watch_falling_edge(reboot_pin, debounce, reboot_handler(runner))?;

        tracing::info!(
            backend = source.name(),
            %shutdown_pin,
            %reboot_pin,
            debounce_ms = debounce.as_millis() as u64,
            "Button monitor initialized"
        );

        Ok(Self {
            source,
            shutdown_pin,
            reboot_pin,
            debounce,
        })
    }

    pub fn shutdown_pin(&self) -> PinId {
        self.shutdown_pin
    }

    pub fn reboot_pin(&self) -> PinId {
        self.reboot_pin
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Keep the process alive so edge handlers can fire.
    ///
    /// Wakes every `keepalive` and does nothing else. Returns only when
    /// `terminate` fires (or its sender is gone), yielding the number of
    /// completed keep-alive cycles. The pins are released on return.
    pub async fn run(self, keepalive: Duration, mut terminate: broadcast::Receiver<()>) -> u64 {
        // tokio rejects a zero period.
        let keepalive = keepalive.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(keepalive);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        tracing::info!(keepalive_ms = keepalive.as_millis() as u64, "Waiting for button presses");

        let mut cycles: u64 = 0;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    cycles += 1;
                    tracing::trace!(cycles, "Keep-alive");
                }
                _ = terminate.recv() => break,
            }
        }

        tracing::info!(cycles, "Button monitor stopped");
        cycles
    }
}

fn shutdown_handler(runner: Arc<dyn CommandRunner>) -> EdgeHandler {
    Box::new(move |pin| on_shutdown_edge(runner.as_ref(), pin))
}

fn reboot_handler(runner: Arc<dyn CommandRunner>) -> EdgeHandler {
    Box::new(move |pin| on_reboot_edge(runner.as_ref(), pin))
}

/// Falling edge on the shutdown pin.
pub fn on_shutdown_edge(runner: &dyn CommandRunner, pin: PinId) {
    handle_edge(PowerAction::Shutdown, runner, pin);
}

/// Falling edge on the reboot pin.
pub fn on_reboot_edge(runner: &dyn CommandRunner, pin: PinId) {
    handle_edge(PowerAction::Reboot, runner, pin);
}

/// Emit the action's notice, then issue its command without waiting.
///
/// The notice goes to [`NOTICE_TARGET`] so a raised log level cannot hide
/// it. A failed command is logged and otherwise ignored; the keep-alive
/// loop carries on.
fn handle_edge(action: PowerAction, runner: &dyn CommandRunner, pin: PinId) {
    tracing::info!(target: NOTICE_TARGET, %pin, %action, "{}", action.notice());

    if let Err(e) = runner.issue(action) {
        tracing::error!(%pin, %action, error = %e, "Power command failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::SimulatedEdgeSource;
    use crate::power::CommandError;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Default)]
    struct Recorder {
        issued: Mutex<Vec<PowerAction>>,
    }

    impl Recorder {
        fn issued(&self) -> Vec<PowerAction> {
            self.issued.lock().unwrap().clone()
        }
    }

    impl CommandRunner for Recorder {
        fn issue(&self, action: PowerAction) -> Result<(), CommandError> {
            self.issued.lock().unwrap().push(action);
            Ok(())
        }
    }

    struct Failing;

    impl CommandRunner for Failing {
        fn issue(&self, action: PowerAction) -> Result<(), CommandError> {
            Err(CommandError::Spawn {
                program: action.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }
    }

    #[test]
    fn test_both_pins_registered() {
        let source = SimulatedEdgeSource::new();
        let recorder = Arc::new(Recorder::default());
        let monitor =
            ButtonMonitor::initialize(source.clone(), &ButtonsConfig::default(), recorder).unwrap();

        assert_eq!(source.registered_pins(), vec![PinId(23), PinId(24)]);
        assert_eq!(source.debounce_for(PinId(23)), Some(Duration::from_millis(200)));
        assert_eq!(monitor.shutdown_pin(), PinId(23));
        assert_eq!(monitor.reboot_pin(), PinId(24));
    }

    #[test]
    fn test_edges_map_to_actions() {
        let source = SimulatedEdgeSource::new();
        let recorder = Arc::new(Recorder::default());
        let _monitor =
            ButtonMonitor::initialize(source.clone(), &ButtonsConfig::default(), recorder.clone())
                .unwrap();

        let start = Instant::now();
        assert!(source.falling_edge_at(PinId(24), start));
        assert!(source.falling_edge_at(PinId(23), start + Duration::from_millis(10)));

        assert_eq!(recorder.issued(), vec![PowerAction::Reboot, PowerAction::Shutdown]);
    }

    #[test]
    fn test_duplicate_pin_registers_nothing() {
        let source = SimulatedEdgeSource::new();
        let recorder = Arc::new(Recorder::default());
        let buttons = ButtonsConfig {
            shutdown_pin: 17,
            reboot_pin: 17,
            ..ButtonsConfig::default()
        };

        let err = ButtonMonitor::initialize(source.clone(), &buttons, recorder).err().unwrap();
        assert!(matches!(err, ConfigurationError::DuplicatePin { pin } if pin == PinId(17)));
        assert!(source.registered_pins().is_empty());
    }

    #[test]
    fn test_invalid_second_pin_registers_nothing() {
        let source = SimulatedEdgeSource::new();
        let recorder = Arc::new(Recorder::default());
        let buttons = ButtonsConfig {
            reboot_pin: 40,
            ..ButtonsConfig::default()
        };

        let err = ButtonMonitor::initialize(source.clone(), &buttons, recorder).err().unwrap();
        assert!(matches!(err, ConfigurationError::InvalidPin { pin } if pin == PinId(40)));
        assert!(source.registered_pins().is_empty());
    }

    #[test]
    fn test_command_failure_is_contained() {
        on_shutdown_edge(&Failing, PinId(23));
        on_reboot_edge(&Failing, PinId(24));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_on_terminate() {
        let source = SimulatedEdgeSource::new();
        let recorder = Arc::new(Recorder::default());
        let monitor =
            ButtonMonitor::initialize(source, &ButtonsConfig::default(), recorder).unwrap();

        let (tx, rx) = broadcast::channel(1);
        let handle = tokio::spawn(monitor.run(Duration::from_millis(500), rx));

        tokio::time::sleep(Duration::from_millis(1_250)).await;
        tx.send(()).unwrap();

        let cycles = handle.await.unwrap();
        assert_eq!(cycles, 2);
    }
}
