//! # userdb HTTP Server Module
//!
//! Thin axum layer over the user store.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/users` - List and create users
//! - `/users/{id}` - Get, replace and delete one user

pub mod config;
pub mod server;
pub mod observability_routes;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
