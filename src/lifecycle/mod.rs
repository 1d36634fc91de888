//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging → Claim pins → Keep-alive loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Keep-alive loop returns → Pins released on drop → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger termination
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, before the loop is entered
//! - A button press never goes through this path; the OS command itself
//!   takes the process down

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
