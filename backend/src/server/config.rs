//! HTTP server configuration object and helpers.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Listener settings loaded from `SERVER_*` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    /// Socket address to bind, for example `0.0.0.0:8080`.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to port 8080 on all
    /// interfaces.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let addr = match self.bind_addr.trim() {
            "" => DEFAULT_BIND_ADDR,
            addr => addr,
        };
        addr.parse()
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
