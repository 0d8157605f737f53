//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use super::user_routes::user_routes;
use crate::storage::UserStore;

/// HTTP Server for userdb
pub struct HttpServer {
    config: HttpServerConfig,
    store: Arc<UserStore>,
}

impl HttpServer {
    /// Create a new HTTP server over the given store
    pub fn new(config: HttpServerConfig, store: Arc<UserStore>) -> Self {
        Self { config, store }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, store: Arc<UserStore>) -> Router {
        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| match s.parse::<HeaderValue>() {
                    Ok(origin) => Some(origin),
                    Err(_) => {
                        warn!(origin = %s, "ignoring unparseable CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(user_routes(store))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the HTTP server, serving until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        info!(
            address = %addr,
            data_file = %self.store.path().display(),
            "server is running on http://{}",
            addr
        );

        let router = Self::build_router(&self.config, self.store.clone());
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
