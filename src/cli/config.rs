//! Service configuration
//!
//! Loaded from an optional JSON file; every key has a default so an
//! empty object (or no file at all) is a valid configuration. Command
//! line flags are applied on top.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::args::ServeArgs;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the user collection (default: "users.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// CORS allowed origins (default: empty, any origin allowed)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Log output format (default: text)
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_file() -> PathBuf {
    PathBuf::from("users.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            cors_origins: Vec::new(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!(
                "Failed to read config '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Build the effective configuration for `serve`: file (if any),
    /// then flag overrides, then validation.
    pub fn resolve(args: &ServeArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        config.apply_overrides(args);
        config.validate()?;

        Ok(config)
    }

    /// Apply command line overrides
    pub fn apply_overrides(&mut self, args: &ServeArgs) {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(data_file) = &args.data_file {
            self.data_file = data_file.clone();
        }
        if let Some(log_format) = args.log_format {
            self.log_format = log_format;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        Ok(())
    }

    /// Settings for the HTTP server
    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}
