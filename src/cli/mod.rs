//! CLI module for userdb
//!
//! Provides command-line interface for:
//! - serve: Load configuration and run the HTTP server
//! - check-config: Validate a configuration file and print the result

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{check_config, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
