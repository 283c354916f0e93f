//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

use crate::error::{Result, ServiceError};

/// Log output formats accepted in `LOG_FORMAT`.
pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Observability ===
    /// Log filter (trace, debug, info, warn, error, or an EnvFilter directive).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log output format: pretty or json.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.host.parse::<IpAddr>().is_err() {
            return Err(format!("HOST must be an IP address, got {:?}", self.host));
        }

        if !LOG_FORMATS.contains(&self.log_format_lower().as_str()) {
            return Err(format!(
                "LOG_FORMAT must be one of {:?}, got {:?}",
                LOG_FORMATS, self.log_format
            ));
        }

        Ok(())
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            ServiceError::InvalidConfig(format!("HOST {:?}: {}", self.host, e))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Get the effective log format (lowercase).
    pub fn log_format_lower(&self) -> String {
        self.log_format.to_lowercase()
    }

    /// Check if logs should be emitted as JSON.
    pub fn is_json_logging(&self) -> bool {
        self.log_format_lower() == "json"
    }
}
