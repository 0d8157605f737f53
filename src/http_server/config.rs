//! HTTP Server Configuration
//!
//! Bind address and CORS settings, built from the service
//! configuration by [`Config::http_config`](crate::cli::Config::http_config).

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// CORS allowed origins (empty: any origin allowed)
    pub cors_origins: Vec<String>,
}

impl HttpServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
    }
}
