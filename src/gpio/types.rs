//! Pin identifiers, edge source trait and configuration errors.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Lowest logical pin number accepted for a button.
pub const MIN_PIN: u8 = 1;

/// Highest logical (BCM) pin number exposed on the 40-pin header.
pub const MAX_PIN: u8 = 27;

/// Logical (BCM) GPIO line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(pub u8);

impl PinId {
    /// Whether the pin lies in the addressable range.
    pub fn is_valid(self) -> bool {
        (MIN_PIN..=MAX_PIN).contains(&self.0)
    }
}

impl From<u8> for PinId {
    fn from(pin: u8) -> Self {
        Self(pin)
    }
}

impl From<PinId> for u8 {
    fn from(pin: PinId) -> Self {
        pin.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// Errors raised while configuring pins at startup.
///
/// All of them are fatal: the monitor never enters its keep-alive loop.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Pin number outside the addressable range.
    #[error("{pin} is not a valid pin (expected {}..={})", MIN_PIN, MAX_PIN)]
    InvalidPin { pin: PinId },

    /// Pin already claimed by another registration.
    #[error("{pin} is already in use")]
    PinInUse { pin: PinId },

    /// Both buttons were assigned the same pin.
    #[error("shutdown and reboot buttons both use {pin}")]
    DuplicatePin { pin: PinId },

    /// The platform GPIO facility could not be opened or configured.
    #[error("GPIO platform error: {0}")]
    Platform(String),
}

/// Callback invoked with the pin whose falling edge passed the debounce filter.
pub type EdgeHandler = Box<dyn FnMut(PinId) + Send + 'static>;

/// A platform event source that delivers falling edges to handlers.
pub trait EdgeSource {
    /// Configure `pin` as an input and call `handler` on each HIGH→LOW
    /// transition, at most once per `debounce` window.
    fn watch_falling_edge(
        &mut self,
        pin: PinId,
        debounce: Duration,
        handler: EdgeHandler,
    ) -> Result<(), ConfigurationError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
