//! Configuration Module
//!
//! Handles loading the addresses of every service and the record file
//! location from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

// == Endpoint ==
/// A host/port pair a service binds to or is reached at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the `host:port` form used for binding and connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// == Config ==
/// Directory configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gateway bind address
    pub gateway: Endpoint,
    /// Instagram backend address
    pub instagram: Endpoint,
    /// WhatsApp backend address
    pub whatsapp: Endpoint,
    /// Path to the record file shared by every service
    pub data_path: String,
    /// Pause between readiness polls in milliseconds
    pub readiness_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HTTP_HOST` / `HTTP_PORT` - Gateway address (default: 127.0.0.1:8080)
    /// - `INSTAGRAM_HOST` / `INSTAGRAM_PORT` - Instagram backend (default: 127.0.0.1:8081)
    /// - `WHATSAPP_HOST` / `WHATSAPP_PORT` - WhatsApp backend (default: 127.0.0.1:8082)
    /// - `DATA_PATH` - Record file (default: data.csv)
    /// - `READINESS_INTERVAL_MS` - Readiness poll pause (default: 250)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gateway: endpoint_from_env("HTTP", defaults.gateway),
            instagram: endpoint_from_env("INSTAGRAM", defaults.instagram),
            whatsapp: endpoint_from_env("WHATSAPP", defaults.whatsapp),
            data_path: env::var("DATA_PATH").unwrap_or(defaults.data_path),
            readiness_interval_ms: parsed_var("READINESS_INTERVAL_MS")
                .unwrap_or(defaults.readiness_interval_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: Endpoint::new("127.0.0.1", 8080),
            instagram: Endpoint::new("127.0.0.1", 8081),
            whatsapp: Endpoint::new("127.0.0.1", 8082),
            data_path: "data.csv".to_string(),
            readiness_interval_ms: 250,
        }
    }
}

fn endpoint_from_env(prefix: &str, fallback: Endpoint) -> Endpoint {
    Endpoint {
        host: env::var(format!("{prefix}_HOST")).unwrap_or(fallback.host),
        port: parsed_var(&format!("{prefix}_PORT")).unwrap_or(fallback.port),
    }
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.gateway, Endpoint::new("127.0.0.1", 8080));
        assert_eq!(config.instagram, Endpoint::new("127.0.0.1", 8081));
        assert_eq!(config.whatsapp, Endpoint::new("127.0.0.1", 8082));
        assert_eq!(config.data_path, "data.csv");
        assert_eq!(config.readiness_interval_ms, 250);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "HTTP_HOST",
            "HTTP_PORT",
            "INSTAGRAM_HOST",
            "INSTAGRAM_PORT",
            "WHATSAPP_HOST",
            "WHATSAPP_PORT",
            "DATA_PATH",
            "READINESS_INTERVAL_MS",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.gateway.address(), "127.0.0.1:8080");
        assert_eq!(config.instagram.address(), "127.0.0.1:8081");
        assert_eq!(config.whatsapp.address(), "127.0.0.1:8082");
        assert_eq!(config.data_path, "data.csv");
    }

    #[test]
    fn test_endpoint_display() {
        let endpoint = Endpoint::new("whatsapp.local", 9000);
        assert_eq!(endpoint.to_string(), "whatsapp.local:9000");
        assert_eq!(endpoint.address(), endpoint.to_string());
    }
}
