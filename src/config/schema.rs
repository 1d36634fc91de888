//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files, and
//! every section falls back to the built-in defaults, so an empty file (or
//! no file at all) yields the stock shutdown/reboot button setup.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gpio::PinId;
use crate::power::PowerAction;

/// Root configuration for the button monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Pin assignment and debounce.
    pub buttons: ButtonsConfig,

    /// Commands issued for each action.
    pub commands: CommandsConfig,

    /// Keep-alive loop settings.
    pub runtime: RuntimeConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Button wiring.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonsConfig {
    /// Logical (BCM) pin of the shutdown button.
    pub shutdown_pin: u8,

    /// Logical (BCM) pin of the reboot button.
    pub reboot_pin: u8,

    /// Minimum re-trigger interval per pin, in milliseconds.
    pub debounce_ms: u64,
}

impl ButtonsConfig {
    pub fn shutdown_pin(&self) -> PinId {
        PinId(self.shutdown_pin)
    }

    pub fn reboot_pin(&self) -> PinId {
        PinId(self.reboot_pin)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            shutdown_pin: 23,
            reboot_pin: 24,
            debounce_ms: 200,
        }
    }
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandSpec {
    /// Executable, resolved through `PATH`.
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Privileged commands bound to the two actions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub shutdown: CommandSpec,
    pub reboot: CommandSpec,
}

impl CommandsConfig {
    /// Command configured for `action`.
    pub fn get(&self, action: PowerAction) -> &CommandSpec {
        match action {
            PowerAction::Shutdown => &self.shutdown,
            PowerAction::Reboot => &self.reboot,
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            shutdown: CommandSpec::new("sudo", &["shutdown", "-h", "now"]),
            reboot: CommandSpec::new("sudo", &["reboot"]),
        }
    }
}

/// Keep-alive loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Wake-up interval of the keep-alive loop, in milliseconds.
    pub keepalive_ms: u64,
}

impl RuntimeConfig {
    pub fn keepalive(&self) -> Duration {
        Duration::from_millis(self.keepalive_ms)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { keepalive_ms: 500 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_wiring() {
        let config = MonitorConfig::default();
        assert_eq!(config.buttons.shutdown_pin(), PinId(23));
        assert_eq!(config.buttons.reboot_pin(), PinId(24));
        assert_eq!(config.buttons.debounce(), Duration::from_millis(200));
        assert_eq!(config.runtime.keepalive(), Duration::from_millis(500));
        assert_eq!(config.commands.shutdown.to_string(), "sudo shutdown -h now");
        assert_eq!(config.commands.reboot.to_string(), "sudo reboot");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: MonitorConfig = toml::from_str("").unwrap();
        assert_eq!(config.buttons.shutdown_pin, 23);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_document() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [buttons]
            reboot_pin = 17

            [commands.reboot]
            program = "systemctl"
            args = ["reboot"]

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.buttons.shutdown_pin, 23);
        assert_eq!(config.buttons.reboot_pin, 17);
        assert_eq!(config.commands.get(PowerAction::Reboot).to_string(), "systemctl reboot");
        assert_eq!(config.commands.get(PowerAction::Shutdown).to_string(), "sudo shutdown -h now");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
