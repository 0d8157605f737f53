//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::args::{Command, ServeArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::storage::UserStore;

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Run the HTTP server until interrupted
///
/// - Resolves configuration (file, then flags)
/// - Installs the log subscriber
/// - Opens the store (the data file is created on first write)
/// - Serves HTTP on a multi-threaded tokio runtime
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    let config = Config::resolve(args)?;

    init_logging(config.log_format)
        .map_err(|e| CliError::boot_failed(format!("Failed to initialize logging: {}", e)))?;

    let store = Arc::new(UserStore::open(&config.data_file));
    info!(
        data_file = %store.path().display(),
        exists = store.path().exists(),
        log_format = %config.log_format,
        "user store opened"
    );

    let server = HttpServer::new(config.http_config(), store);

    // Start the async runtime and run the server
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Validate a config file and print the effective configuration
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &config)?;
    writeln!(stdout)?;

    Ok(())
}
