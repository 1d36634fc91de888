//! Power actions bound to the two buttons.

use std::fmt;

/// OS-level action triggered by a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerAction {
    /// Halt and power off the machine.
    Shutdown,
    /// Restart the machine.
    Reboot,
}

impl PowerAction {
    /// Diagnostic notice emitted right before the command is issued.
    pub fn notice(self) -> &'static str {
        match self {
            PowerAction::Shutdown => "shutting down",
            PowerAction::Reboot => "rebooting",
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerAction::Shutdown => f.write_str("shutdown"),
            PowerAction::Reboot => f.write_str("reboot"),
        }
    }
}
