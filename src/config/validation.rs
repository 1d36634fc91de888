//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate pin numbers against the addressable range
//! - Reject shared pins between the two buttons
//! - Validate value ranges (debounce and keep-alive > 0, commands set)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before any pin is claimed

use thiserror::Error;

use crate::config::schema::MonitorConfig;
use crate::gpio::types::{PinId, MAX_PIN, MIN_PIN};
use crate::power::PowerAction;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{button} button pin {pin} is outside {}..={}", MIN_PIN, MAX_PIN)]
    PinOutOfRange { button: PowerAction, pin: PinId },

    #[error("shutdown and reboot buttons share {0}")]
    SharedPin(PinId),

    #[error("debounce_ms must be greater than zero")]
    ZeroDebounce,

    #[error("keepalive_ms must be greater than zero")]
    ZeroKeepalive,

    #[error("{0} command has an empty program")]
    EmptyCommand(PowerAction),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let buttons = &config.buttons;

    for (button, pin) in [
        (PowerAction::Shutdown, buttons.shutdown_pin()),
        (PowerAction::Reboot, buttons.reboot_pin()),
    ] {
        if !pin.is_valid() {
            errors.push(ValidationError::PinOutOfRange { button, pin });
        }
    }

    if buttons.shutdown_pin == buttons.reboot_pin {
        errors.push(ValidationError::SharedPin(buttons.shutdown_pin()));
    }

    if buttons.debounce_ms == 0 {
        errors.push(ValidationError::ZeroDebounce);
    }

    if config.runtime.keepalive_ms == 0 {
        errors.push(ValidationError::ZeroKeepalive);
    }

    for action in [PowerAction::Shutdown, PowerAction::Reboot] {
        if config.commands.get(action).program.trim().is_empty() {
            errors.push(ValidationError::EmptyCommand(action));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
