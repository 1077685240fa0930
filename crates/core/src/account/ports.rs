//! Port interfaces for user account management
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for user operations.

use async_trait::async_trait;
use chronicle_domain::{Result, User};

/// Trait for user persistence and retrieval
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Get a user by email (expects an already-lowercased email)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> Result<()>;

    /// Delete a user by ID, returning the number of rows removed
    async fn delete(&self, id: &str) -> Result<u64>;
}

/// Trait for password hashing and verification
///
/// Kept synchronous: hashing is CPU-bound and has no I/O.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, password: &str) -> Result<String>;

    /// Verify a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}
