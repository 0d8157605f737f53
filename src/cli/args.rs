//! CLI argument definitions using clap
//!
//! Commands:
//! - userdb serve [--config <path>] [--host <h>] [--port <p>] [--data-file <path>] [--log-format text|json]
//! - userdb check-config --config <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogFormat;

/// userdb - A small file-backed user record service
#[derive(Parser, Debug)]
#[command(name = "userdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Validate a configuration file and print the effective settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long)]
        config: PathBuf,
    },
}

/// Flags for `serve`; each one overrides the config file
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long)]
    pub port: Option<u16>,

    /// Path of the JSON data file
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
