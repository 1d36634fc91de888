//! Command runners that carry out a [`PowerAction`].

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use thiserror::Error;

use crate::config::schema::CommandsConfig;
use crate::power::action::PowerAction;

/// Errors from issuing a power command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command could not be started (missing binary, no permission).
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Issues the OS command for a power action.
///
/// Implementations are shared between interrupt contexts and must not
/// block on the command's completion.
pub trait CommandRunner: Send + Sync {
    fn issue(&self, action: PowerAction) -> Result<(), CommandError>;
}

/// Runs the configured shutdown/reboot commands as child processes.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    commands: CommandsConfig,
}

impl SystemCommandRunner {
    pub fn new(commands: CommandsConfig) -> Self {
        Self { commands }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn issue(&self, action: PowerAction) -> Result<(), CommandError> {
        let spec = self.commands.get(action);

        // The machine may go down before buffered output is written.
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: spec.program.clone(),
                source,
            })?;

        tracing::info!(%action, command = %spec, pid = child.id(), "Power command issued");

        let command = spec.to_string();
        let reaper = thread::Builder::new()
            .name(format!("{}-reaper", action))
            .spawn(move || match child.wait() {
                Ok(status) if status.success() => {
                    tracing::debug!(%command, "Power command exited");
                }
                Ok(status) => {
                    tracing::warn!(%command, %status, "Power command exited unsuccessfully");
                }
                Err(e) => {
                    tracing::warn!(%command, error = %e, "Failed to wait for power command");
                }
            });
        if let Err(e) = reaper {
            tracing::warn!(%action, error = %e, "Could not start reaper thread");
        }

        Ok(())
    }
}

/// Logs the command that would run without executing anything.
#[derive(Debug, Clone)]
pub struct DryRunCommandRunner {
    commands: CommandsConfig,
}

impl DryRunCommandRunner {
    pub fn new(commands: CommandsConfig) -> Self {
        Self { commands }
    }
}

impl CommandRunner for DryRunCommandRunner {
    fn issue(&self, action: PowerAction) -> Result<(), CommandError> {
        let spec = self.commands.get(action);
        tracing::warn!(%action, command = %spec, "Dry run: power command not executed");
        Ok(())
    }
}
