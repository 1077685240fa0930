//! User account types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account stored in the database
///
/// Emails are stored lowercase; uniqueness is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2 hash, never the plaintext. Excluded from serialized output.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub created_at: DateTime<Utc>,
}
