//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the server configuration and the process start time; nothing in
//! here is mutated after startup.

use chrono::{DateTime, Utc};
use luhn_core::{VerifyError, VerifyResult};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

/// Application configuration
///
/// Resolved in layers: built-in defaults, then `config/server.toml` if one
/// exists, then `HOST` / `PORT` / `ENVIRONMENT` from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            environment: "development".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config file and environment variables
    pub fn load() -> VerifyResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base = load_config_file()?.unwrap_or_default();
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a TOML config document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> VerifyResult<Self> {
        toml::from_str(content).map_err(|e| VerifyError::Configuration(e.to_string()))
    }

    /// Apply `HOST`, `PORT` and `ENVIRONMENT` overrides from `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> VerifyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }

        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|_| {
                VerifyError::Configuration(format!("PORT must be a port number, got {:?}", port))
            })?;
        }

        if let Some(environment) = lookup("ENVIRONMENT") {
            self.environment = environment;
        }

        Ok(self)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> VerifyResult<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            VerifyError::Configuration(format!("HOST must be an IP address, got {:?}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState from the environment
    pub fn new() -> VerifyResult<Self> {
        Ok(Self::with_config(AppConfig::load()?))
    }

    /// Create a new AppState with an explicit config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            started_at: Utc::now(),
        }
    }

    /// Seconds since the server started
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// Load server config from `config/server.toml`
fn load_config_file() -> VerifyResult<Option<AppConfig>> {
    let config_paths = [
        "config/server.toml",
        "../config/server.toml",
        "../../config/server.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let config = AppConfig::from_toml_str(&content).map_err(|e| {
                VerifyError::Configuration(format!("Failed to parse {}: {}", path, e))
            })?;
            tracing::info!("Loaded server config from {}", path);
            return Ok(Some(config));
        }
    }

    tracing::debug!("No server config file found, using defaults");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default().with_overrides(lookup(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4000);
        assert!(!config.is_production());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .with_overrides(lookup(&[
                ("HOST", "0.0.0.0"),
                ("PORT", "8080"),
                ("ENVIRONMENT", "production"),
            ]))
            .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.is_production());
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let err = AppConfig::default()
            .with_overrides(lookup(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, VerifyError::Configuration(_)));
    }

    #[test]
    fn test_toml_config_keeps_defaults_for_missing_keys() {
        let config = AppConfig::from_toml_str("port = 9000\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.environment, "development");

        assert!(AppConfig::from_toml_str("port = \"x\"").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");

        let config = AppConfig {
            host: "::1".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:4000");

        let config = AppConfig {
            host: "localhost".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_uptime_starts_at_zero() {
        let state = AppState::with_config(AppConfig::default());
        assert!(state.uptime_secs() <= 1);
    }
}
