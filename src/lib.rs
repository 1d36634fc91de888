//! Raspberry Pi shutdown/reboot button daemon.
//!
//! Two push buttons, each pulling a GPIO line low when pressed, are bound to
//! the system's shutdown and reboot commands.
//!
//! # Architecture Overview
//!
//! ```text
//!   Button ──▶ ┌──────────────┐   ┌──────────┐   ┌──────────────┐   ┌───────────────┐
//!   (LOW)      │ gpio source  │──▶│ debounce │──▶│   monitor    │──▶│ power runner  │──▶ OS
//!              │ rppal / sim  │   │  200 ms  │   │   handler    │   │ spawn command │
//!              └──────────────┘   └──────────┘   └──────────────┘   └───────────────┘
//!
//!   main task: config → logging → monitor.initialize → monitor.run (keep-alive)
//!                                                         ▲
//!                                  lifecycle::signals ────┘ SIGTERM / SIGINT
//! ```

pub mod config;
pub mod gpio;
pub mod lifecycle;
pub mod monitor;
pub mod observability;
pub mod power;

pub use config::schema::MonitorConfig;
pub use gpio::{ConfigurationError, EdgeSource, PinId};
pub use lifecycle::Shutdown;
pub use monitor::ButtonMonitor;
pub use power::{CommandRunner, PowerAction};
