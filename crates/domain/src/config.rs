//! Application configuration structures

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INSERT_TIMEOUT_SECS, DEFAULT_TOKEN_TTL_DAYS};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronicleConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Connection pool size
    pub pool_size: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Token issuance and verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for token signing
    pub secret: String,
    /// Token validity window in days
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
}

/// Bulk submission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Per-insert timeout in seconds; a stuck insert fails its task rather
    /// than hanging the whole batch.
    #[serde(default = "default_insert_timeout_secs")]
    pub insert_timeout_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { insert_timeout_secs: DEFAULT_INSERT_TIMEOUT_SECS }
    }
}

fn default_token_ttl_days() -> i64 {
    DEFAULT_TOKEN_TTL_DAYS
}

fn default_insert_timeout_secs() -> u64 {
    DEFAULT_INSERT_TIMEOUT_SECS
}
