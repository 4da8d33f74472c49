//! HTTP Server Configuration
//!
//! Configuration for the founder-dashboard REST API server.

use std::net::SocketAddr;

/// HTTP server configuration
///
/// ## Environment Variables
///
/// - `HTTP_HOST`: Server bind address (default: 127.0.0.1)
/// - `HTTP_PORT`: Server port (default: 3000)
///
/// Authentication and role gating live in the surrounding application, not in
/// this engine, so no token configuration is read here.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Server bind address
    pub addr: SocketAddr,
}

impl HttpConfig {
    /// Load HTTP configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if HTTP_HOST/HTTP_PORT contain unparseable values
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let host = std::env::var("HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        Ok(Self {
            addr: format!("{}:{}", host, port).parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        std::env::remove_var("HTTP_HOST");
        std::env::remove_var("HTTP_PORT");

        let config = HttpConfig::from_env().expect("Failed to load config");
        assert_eq!(config.addr.to_string(), "127.0.0.1:3000");
    }
}
