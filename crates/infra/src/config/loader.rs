//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. If no file is found, uses the built-in defaults
//!
//! ## Environment Variables
//! - `CIVICA_DB_PATH`: Database file path
//! - `CIVICA_DB_POOL_SIZE`: Connection pool size (optional)
//! - `CIVICA_LOG_LEVEL`: Default tracing filter directive (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.toml` or `./config.json`
//! 2. `./civica.toml` or `./civica.json`

use std::path::{Path, PathBuf};

use civica_domain::{CivicaError, Config, DatabaseConfig, LoggingConfig, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to a config file; without one, the
/// built-in defaults apply.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment configuration incomplete, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(&path),
                None => {
                    tracing::info!("no configuration file found, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// `CIVICA_DB_PATH` must be present; the remaining variables fall back to
/// their defaults.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("CIVICA_DB_PATH")?;

    let pool_size = match std::env::var("CIVICA_DB_POOL_SIZE") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| CivicaError::Config(format!("invalid pool size: {e}")))?,
        Err(_) => DatabaseConfig::default().pool_size,
    };

    let level =
        std::env::var("CIVICA_LOG_LEVEL").unwrap_or_else(|_| LoggingConfig::default().level);

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size },
        logging: LoggingConfig { level },
    })
}

/// Load configuration from a TOML or JSON file, detected by extension.
pub fn load_from_file(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CivicaError::Config(format!("failed to read {}: {e}", path.display()))
    })?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&contents)
            .map_err(|e| CivicaError::Config(format!("invalid TOML in {}: {e}", path.display())))?,
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| CivicaError::Config(format!("invalid JSON in {}: {e}", path.display())))?,
        _ => {
            return Err(CivicaError::Config(format!(
                "unsupported config format: {}",
                path.display()
            )))
        }
    };

    tracing::info!(path = %path.display(), "configuration loaded from file");
    Ok(config)
}

fn probe_config_paths() -> Option<PathBuf> {
    const CANDIDATES: [&str; 4] =
        ["config.toml", "config.json", "civica.toml", "civica.json"];

    CANDIDATES.into_iter().map(PathBuf::from).find(|path| path.is_file())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| CivicaError::Config(format!("missing environment variable {name}")))
}
