//! HTTP server configuration.

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// HTTP API listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0).
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind (default: 3000). `PORT` overrides it.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Externally reachable base URL of the API. `SERVER_URL` overrides it.
    #[serde(default)]
    pub public_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
        }
    }
}

impl ServerConfig {
    /// The address to bind.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if `host` is not an IP address.
    #[allow(clippy::result_large_err)]
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    field: "server.host",
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces() {
        let addr = ServerConfig::default().socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn hostname_is_rejected() {
        let config = ServerConfig {
            host: "localhost".into(),
            ..ServerConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
