//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (pin, action, command fields)
//!     → logging.rs subscriber (stdout, picked up by journald under systemd)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings
//! - The "shutting down" / "rebooting" notices go to their own target,
//!   enabled regardless of the configured level

pub mod logging;

pub use logging::{build_filter, init_logging, LoggingError, NOTICE_TARGET};
