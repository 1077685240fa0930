//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CHRONICLE_DB_PATH`: Database file path
//! - `CHRONICLE_DB_POOL_SIZE`: Connection pool size
//! - `CHRONICLE_SERVER_HOST`: HTTP listen host
//! - `CHRONICLE_SERVER_PORT`: HTTP listen port
//! - `CHRONICLE_AUTH_SECRET`: Token signing secret
//! - `CHRONICLE_AUTH_TOKEN_TTL_DAYS`: Token validity window (default 30)
//! - `CHRONICLE_BATCH_INSERT_TIMEOUT_SECS`: Per-insert batch timeout (default 30)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./chronicle.json` or `./chronicle.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use chronicle_domain::constants::{DEFAULT_INSERT_TIMEOUT_SECS, DEFAULT_TOKEN_TTL_DAYS};
use chronicle_domain::{
    AuthConfig, BatchConfig, ChronicleConfig, ChronicleError, DatabaseConfig, Result, ServerConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ChronicleError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ChronicleConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `ChronicleError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<ChronicleConfig> {
    let db_path = env_var("CHRONICLE_DB_PATH")?;
    let db_pool_size = env_var("CHRONICLE_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| ChronicleError::Config(format!("Invalid pool size: {}", e)))
    })?;

    let server_host = env_var("CHRONICLE_SERVER_HOST")?;
    let server_port = env_var("CHRONICLE_SERVER_PORT").and_then(|s| {
        s.parse::<u16>().map_err(|e| ChronicleError::Config(format!("Invalid port: {}", e)))
    })?;

    let auth_secret = env_var("CHRONICLE_AUTH_SECRET")?;
    let token_ttl_days = env_var_or_default(
        "CHRONICLE_AUTH_TOKEN_TTL_DAYS",
        DEFAULT_TOKEN_TTL_DAYS,
        "Invalid token TTL",
    )?;
    let insert_timeout_secs = env_var_or_default(
        "CHRONICLE_BATCH_INSERT_TIMEOUT_SECS",
        DEFAULT_INSERT_TIMEOUT_SECS,
        "Invalid insert timeout",
    )?;

    Ok(ChronicleConfig {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        server: ServerConfig { host: server_host, port: server_port },
        auth: AuthConfig { secret: auth_secret, token_ttl_days },
        batch: BatchConfig { insert_timeout_secs },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ChronicleError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ChronicleConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ChronicleError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ChronicleError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ChronicleError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ChronicleConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ChronicleError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ChronicleError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ChronicleError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("chronicle.json"),
            cwd.join("chronicle.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("chronicle.json"),
                exe_dir.join("chronicle.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ChronicleError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable with a fallback default
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T, label: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => {
            raw.parse::<T>().map_err(|e| ChronicleError::Config(format!("{}: {}", label, e)))
        }
        Err(_) => Ok(default),
    }
}
