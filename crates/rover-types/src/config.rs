//! Configuration types for the rover position store.
//!
//! `RoverConfig` represents the `config.toml` in the data directory that
//! controls the listen address, the session cookie name, and the database
//! location.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.rover/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverConfig {
    /// Interface the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Name of the cookie carrying the session identifier.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Explicit database URL. When unset, `rover.db` inside the data directory is used.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_session_cookie() -> String {
    "rover_session".to_string()
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_cookie: default_session_cookie(),
            database_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = RoverConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.session_cookie, "rover_session");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: RoverConfig = toml::from_str("").unwrap();
        assert_eq!(config, RoverConfig::default());
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
host = "0.0.0.0"
port = 9090
session_cookie = "sid"
database_url = "sqlite::memory:"
"#;
        let config: RoverConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.session_cookie, "sid");
        assert_eq!(config.database_url.as_deref(), Some("sqlite::memory:"));
    }
}
