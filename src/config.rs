//! Process configuration shared by the binaries

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::error::{DesignError, Result};

/// Which transport the server process runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// JSON-RPC over stdio
    #[default]
    Mcp,
    /// HTTP REST API
    Rest,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportMode::Mcp => write!(f, "mcp"),
            TransportMode::Rest => write!(f, "rest"),
        }
    }
}

impl std::str::FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcp" | "stdio" => Ok(TransportMode::Mcp),
            "rest" | "http" => Ok(TransportMode::Rest),
            _ => Err(format!("Unknown transport mode: {}", s)),
        }
    }
}

/// Settings for the REST transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// `*` allows any origin
    pub cors_origin: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origin: "*".to_string(),
        }
    }
}

impl HttpConfig {
    /// Host and port to bind; the host may be a name such as `localhost`
    /// and is resolved when the listener binds
    pub fn bind_address(&self) -> Result<(&str, u16)> {
        let host = self.host.trim();
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(DesignError::Config(format!("invalid listen host: {:?}", self.host)));
        }
        Ok((host, self.port))
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origin.trim() == "*"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub mode: TransportMode,
    /// Location of the JSON document, already tilde-expanded
    pub data_path: String,
    pub http: HttpConfig,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_path.trim().is_empty() {
            return Err(DesignError::Config("data path must not be empty".to_string()));
        }

        if self.mode == TransportMode::Rest {
            if self.http.port == 0 {
                return Err(DesignError::Config("REST port must be non-zero".to_string()));
            }
            self.http.bind_address()?;
            if !self.http.allows_any_origin()
                && HeaderValue::from_str(self.http.cors_origin.trim()).is_err()
            {
                return Err(DesignError::Config(format!(
                    "invalid CORS origin: {}",
                    self.http.cors_origin
                )));
            }
        }

        Ok(())
    }
}
