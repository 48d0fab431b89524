//! emus entry point
//!
//! Parses flags, sets up logging and the history store, then runs the
//! launch flow once.

use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use emus::backend::SystemBackend;
use emus::cli::Cli;
use emus::commands::{LaunchCommand, Outcome};
use emus::core::{FileHistoryStore, HistoryStore, MemoryHistoryStore, APP_NAME, VERSION};
use emus::prompt::{FirstChoicePrompt, TerminalPrompt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose)?;
    debug!("{} v{} starting", APP_NAME, VERSION);

    let history = open_history();
    let backend = SystemBackend::new();
    let command = LaunchCommand::new(cli.launch_flags());

    let interactive = !cli.no_interactive && console::user_attended();
    let result = if interactive {
        command.execute(&backend, history.as_ref(), &TerminalPrompt).await
    } else {
        info!("Non-interactive run; starting the top-ranked device");
        command.execute(&backend, history.as_ref(), &FirstChoicePrompt).await
    };

    match result {
        Ok(Outcome::Launched(request)) => {
            info!("Started {}", request.device.display_name());
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Exited) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initialize logging from RUST_LOG, defaulting to warnings only
fn setup_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to set tracing subscriber: {}", e))
}

/// Persistent history when a config directory exists, otherwise this run only
fn open_history() -> Box<dyn HistoryStore> {
    match FileHistoryStore::locate() {
        Ok(store) => {
            debug!("Usage history at {:?}", store.path());
            Box::new(store)
        }
        Err(e) => {
            warn!("{}; usage history will not be saved", e.user_message());
            Box::new(MemoryHistoryStore::new())
        }
    }
}
