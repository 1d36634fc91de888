//! In-process edge source.
//!
//! Edges are injected by calling [`SimulatedEdgeSource::falling_edge`] and
//! are delivered synchronously on the caller's thread, through the same
//! [`DebouncedHandler`] the hardware backend uses. Clones share the same
//! registrations, so a test can keep one handle while the monitor owns
//! another.
//!
//! Handlers run with only their own pin locked, never the registry. A
//! handler that panics leaves its pin usable; its filter state is kept.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::gpio::debounce::DebouncedHandler;
use crate::gpio::types::{ConfigurationError, EdgeHandler, EdgeSource, PinId};

type Registration = Arc<Mutex<DebouncedHandler>>;

/// Edge source driven by explicit calls instead of hardware interrupts.
#[derive(Clone, Default)]
pub struct SimulatedEdgeSource {
    registrations: Arc<Mutex<HashMap<PinId, Registration>>>,
}

impl SimulatedEdgeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a falling edge on `pin` now.
    ///
    /// Returns whether a handler ran.
    pub fn falling_edge(&self, pin: PinId) -> bool {
        self.falling_edge_at(pin, Instant::now())
    }

    /// Inject a falling edge on `pin` observed at `at`.
    pub fn falling_edge_at(&self, pin: PinId, at: Instant) -> bool {
        let Some(registration) = self.registration(pin) else {
            tracing::trace!(%pin, "Edge on unwatched pin ignored");
            return false;
        };

        let mut handler = registration.lock().unwrap_or_else(PoisonError::into_inner);
        handler.fire(pin, at)
    }

    /// Pins that currently have a handler, in ascending order.
    pub fn registered_pins(&self) -> Vec<PinId> {
        let registrations = self.registrations.lock().expect("edge registry mutex poisoned");
        let mut pins: Vec<PinId> = registrations.keys().copied().collect();
        pins.sort();
        pins
    }

    /// Debounce window configured for `pin`, if it is watched.
    pub fn debounce_for(&self, pin: PinId) -> Option<Duration> {
        let registration = self.registration(pin)?;
        let handler = registration.lock().unwrap_or_else(PoisonError::into_inner);
        Some(handler.window())
    }

    fn registration(&self, pin: PinId) -> Option<Registration> {
        let registrations = self.registrations.lock().expect("edge registry mutex poisoned");
        registrations.get(&pin).cloned()
    }
}

impl EdgeSource for SimulatedEdgeSource {
    fn watch_falling_edge(
        &mut self,
        pin: PinId,
        debounce: Duration,
        handler: EdgeHandler,
    ) -> Result<(), ConfigurationError> {
        if !pin.is_valid() {
            return Err(ConfigurationError::InvalidPin { pin });
        }

        let mut registrations = self.registrations.lock().expect("edge registry mutex poisoned");
        if registrations.contains_key(&pin) {
            return Err(ConfigurationError::PinInUse { pin });
        }

        registrations.insert(pin, Arc::new(Mutex::new(DebouncedHandler::new(debounce, handler))));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
