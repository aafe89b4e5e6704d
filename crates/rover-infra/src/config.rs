//! Configuration loader for the rover position store.
//!
//! Reads `config.toml` from the data directory (`~/.rover/` in production)
//! and deserializes it into [`RoverConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use rover_types::config::RoverConfig;

use crate::sqlite::pool::database_url_for;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `ROVER_DATA_DIR` environment variable
/// 2. `~/.rover`
/// 3. `.rover` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ROVER_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".rover");
    }

    PathBuf::from(".rover")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`RoverConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> RoverConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return RoverConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return RoverConfig::default();
        }
    };

    match toml::from_str::<RoverConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RoverConfig::default()
        }
    }
}

/// The database URL to open: the configured one, else `rover.db` in the data directory.
pub fn resolve_database_url(config: &RoverConfig, data_dir: &Path) -> String {
    config
        .database_url
        .clone()
        .unwrap_or_else(|| database_url_for(data_dir))
}
