//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code. Store and
//! request errors never reach this layer; once `serve` is running they
//! are answered over HTTP.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Unreadable or invalid config file, or a flag override that fails
    /// validation (empty host, port 0, empty data file path)
    ConfigError,
    /// Writing the effective configuration for `check-config` failed
    IoError,
    /// `serve` could not start or stopped with an error: log subscriber
    /// already installed, tokio runtime creation, or binding the listen
    /// address
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "USERDB_CLI_CONFIG_ERROR",
            Self::IoError => "USERDB_CLI_IO_ERROR",
            Self::BootFailed => "USERDB_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("port must be > 0");
        assert_eq!(err.to_string(), "USERDB_CLI_CONFIG_ERROR: port must be > 0");
    }

    #[test]
    fn test_io_conversion() {
        let err: CliError = io::Error::other("broken pipe").into();
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert!(err.message().contains("broken pipe"));
    }

    #[test]
    fn test_boot_failure_code() {
        let err = CliError::boot_failed("HTTP server failed: address in use");
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
        assert!(err.to_string().starts_with("USERDB_CLI_BOOT_FAILED: "));
    }
}
