//! Raspberry Pi GPIO backend built on `rppal`.
//!
//! rppal delivers async interrupts on one background thread per pin.
//! rppal's own debounce maps to the kernel line debounce, which only reports
//! an edge once the line has been stable for the whole period; it is left
//! off and each callback owns a [`DebouncedHandler`] instead, so the first
//! edge fires immediately. Interrupts stay armed for as long as the
//! `InputPin` is alive, so the source keeps every claimed pin until it is
//! dropped.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rppal::gpio::{Gpio, InputPin, Trigger};

use crate::gpio::debounce::DebouncedHandler;
use crate::gpio::types::{ConfigurationError, EdgeHandler, EdgeSource, PinId};

/// Edge source backed by the Pi's GPIO character device.
pub struct RppalEdgeSource {
    gpio: Gpio,
    pins: HashMap<PinId, InputPin>,
}

impl RppalEdgeSource {
    /// Open the GPIO peripheral.
    ///
    /// Fails on hosts that are not a supported Raspberry Pi model or when
    /// the process lacks access to the GPIO device.
    pub fn new() -> Result<Self, ConfigurationError> {
        let gpio = Gpio::new().map_err(|e| ConfigurationError::Platform(e.to_string()))?;
        Ok(Self {
            gpio,
            pins: HashMap::new(),
        })
    }
}

impl EdgeSource for RppalEdgeSource {
    fn watch_falling_edge(
        &mut self,
        pin: PinId,
        debounce: Duration,
        handler: EdgeHandler,
    ) -> Result<(), ConfigurationError> {
        if !pin.is_valid() {
            return Err(ConfigurationError::InvalidPin { pin });
        }
        if self.pins.contains_key(&pin) {
            return Err(ConfigurationError::PinInUse { pin });
        }

        // No pull-up here: the button hat provides it.
        let mut input = self
            .gpio
            .get(pin.0)
            .map_err(|e| ConfigurationError::Platform(format!("{}: {}", pin, e)))?
            .into_input();

        let mut debounced = DebouncedHandler::new(debounce, handler);
        input
            .set_async_interrupt(Trigger::FallingEdge, None, move |_| {
                debounced.fire(pin, Instant::now());
            })
            .map_err(|e| ConfigurationError::Platform(format!("{}: {}", pin, e)))?;

        tracing::debug!(%pin, debounce_ms = debounce.as_millis() as u64, "Falling-edge interrupt armed");
        self.pins.insert(pin, input);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "rppal"
    }
}
