//! Privileged power commands.
//!
//! # Data Flow
//! ```text
//! Edge handler
//!     → PowerAction (shutdown | reboot)
//!     → CommandRunner::issue
//!         SystemCommandRunner: spawn configured command, reap in background
//!         DryRunCommandRunner: log only
//! ```
//!
//! # Design Decisions
//! - Fire-and-forget: the caller never waits for the command to finish
//! - No retries; a failed spawn is reported to the caller and logged
//! - Exit status is only logged, never acted upon

pub mod action;
pub mod runner;

pub use action::PowerAction;
pub use runner::{CommandError, CommandRunner, DryRunCommandRunner, SystemCommandRunner};
