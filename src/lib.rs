//! userdb - A small file-backed user record service
//!
//! The core is the user repository:
//! - [`schema`]: validates candidate records
//! - [`identity`]: generates record ids
//! - [`storage`]: the file-backed store with load-modify-store semantics
//!
//! Around it sit the HTTP API ([`http_server`]), the command line
//! ([`cli`]) and logging setup ([`observability`]).

pub mod cli;
pub mod http_server;
pub mod identity;
pub mod observability;
pub mod schema;
pub mod storage;
