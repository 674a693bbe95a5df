use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};

/// Where the store lands when nothing else is configured.
pub const DEFAULT_DATABASE_PATH: &str = "data/reports.sqlite";

/// Resolved application configuration.
#[derive(Deserialize, Debug)]
pub struct AppConfig {
    /// Filesystem path of the `SQLite` database file.
    pub database_path: String,
}

/// Parses an `AppConfig` from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path_ref, e)))?;
    let app_config: AppConfig = toml::from_str(&contents).map_err(|e| {
        Error::Config(format!(
            "Failed to parse TOML from config file {:?}: {}",
            path_ref, e
        ))
    })?;
    Ok(app_config)
}

/// Resolves configuration for the process.
///
/// Precedence: `REPORT_DB_PATH` environment variable, then a TOML file named
/// by `REPORT_STORE_CONFIG`, then [`DEFAULT_DATABASE_PATH`]. A `.env` file is
/// loaded first if present; missing `.env` is not an error since the
/// variables can be set externally.
pub fn load_app_configuration() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    if let Ok(database_path) = env::var("REPORT_DB_PATH") {
        tracing::info!("Using database path from REPORT_DB_PATH: {}", database_path);
        return Ok(AppConfig { database_path });
    }

    if let Ok(config_path) = env::var("REPORT_STORE_CONFIG") {
        return load_config(config_path);
    }

    tracing::debug!("No configuration found; defaulting database path.");
    Ok(AppConfig {
        database_path: DEFAULT_DATABASE_PATH.to_string(),
    })
}
