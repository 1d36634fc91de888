//! Button monitor.
//!
//! # States
//! - Idle: keep-alive loop sleeping, handlers armed
//! - Executing: inside a handler, issuing a power command
//!
//! # State Transitions
//! ```text
//! Idle → Executing: debounced falling edge on either pin
//! Executing → Idle: handler returns (the OS command normally ends the process first)
//! ```
//!
//! # Design Decisions
//! - One monitor value per process owns both registrations; no globals
//! - Handlers run on the edge source's context, never on the loop
//! - The two handlers are independent; a simultaneous press may issue
//!   both commands and whichever the OS acts on last wins

pub mod button;

pub use button::{on_reboot_edge, on_shutdown_edge, ButtonMonitor};
