//! pi-shutdown daemon entry point.
//!
//! With no arguments the daemon watches BCM 23 (shutdown) and BCM 24
//! (reboot) and runs `sudo shutdown -h now` / `sudo reboot` on a press.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::broadcast;

use pi_shutdown::config::{load_or_default, ButtonsConfig};
use pi_shutdown::gpio::{EdgeSource, PinId, RppalEdgeSource, SimulatedEdgeSource};
use pi_shutdown::lifecycle::{signals, Shutdown};
use pi_shutdown::monitor::ButtonMonitor;
use pi_shutdown::observability::init_logging;
use pi_shutdown::power::{CommandRunner, DryRunCommandRunner, SystemCommandRunner};

#[derive(Parser)]
#[command(name = "pi-shutdown")]
#[command(about = "Shut down or reboot a Raspberry Pi from GPIO buttons", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    /// Log the power commands instead of running them.
    #[arg(long)]
    dry_run: bool,

    /// Read pin numbers from stdin instead of watching real GPIO lines.
    #[arg(long)]
    simulate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    init_logging(&config.observability)?;

    tracing::info!("pi-shutdown v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        shutdown_pin = config.buttons.shutdown_pin,
        reboot_pin = config.buttons.reboot_pin,
        debounce_ms = config.buttons.debounce_ms,
        shutdown_command = %config.commands.shutdown,
        reboot_command = %config.commands.reboot,
        dry_run = cli.dry_run,
        "Configuration loaded"
    );

    let runner: Arc<dyn CommandRunner> = if cli.dry_run {
        Arc::new(DryRunCommandRunner::new(config.commands.clone()))
    } else {
        Arc::new(SystemCommandRunner::new(config.commands.clone()))
    };

    let shutdown = Arc::new(Shutdown::new());
    let terminate = shutdown.subscribe();
    signals::spawn_listener(shutdown.clone());

    let keepalive = config.runtime.keepalive();
    if cli.simulate {
        let source = SimulatedEdgeSource::new();
        feed_stdin_edges(source.clone());
        run_monitor(source, &config.buttons, runner, keepalive, terminate).await?;
    } else {
        let source = RppalEdgeSource::new().inspect_err(|e| {
            tracing::error!(error = %e, "GPIO unavailable");
        })?;
        run_monitor(source, &config.buttons, runner, keepalive, terminate).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run_monitor<S: EdgeSource>(
    source: S,
    buttons: &ButtonsConfig,
    runner: Arc<dyn CommandRunner>,
    keepalive: Duration,
    terminate: broadcast::Receiver<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    let monitor = ButtonMonitor::initialize(source, buttons, runner).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to configure buttons");
    })?;

    monitor.run(keepalive, terminate).await;
    Ok(())
}

/// Turn each stdin line holding a pin number into a falling edge.
fn feed_stdin_edges(source: SimulatedEdgeSource) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match line.trim().parse::<u8>() {
                Ok(pin) => {
                    if !source.falling_edge(PinId(pin)) {
                        tracing::debug!(pin, "Simulated edge not delivered");
                    }
                }
                Err(_) => tracing::warn!(input = %line.trim(), "Expected a pin number"),
            }
        }
    });
}
