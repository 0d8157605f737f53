//! Observability for userdb
//!
//! - Structured logging through `tracing`
//! - Human-readable or JSON-lines output, chosen at startup
//! - Filter taken from `RUST_LOG`, defaulting to `info`
//!
//! # Usage
//!
//! ```ignore
//! use userdb::observability::{init_logging, LogFormat};
//!
//! init_logging(LogFormat::Json)?;
//! tracing::info!(id = "42", "user created");
//! ```

mod logger;

pub use logger::{init_logging, LogFormat, DEFAULT_FILTER};
