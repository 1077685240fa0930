//! Account service - registration, login, deletion

use std::sync::Arc;

use chronicle_domain::{ChronicleError, Result, User};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::ports::{PasswordHasher, UserRepository};
use crate::identity::ports::TokenCodec;

/// User account service
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
}

impl AccountService {
    /// Create a new account service
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
    ) -> Self {
        Self { users, hasher, tokens }
    }

    /// Register a new user
    ///
    /// Emails are trimmed and lowercased before the uniqueness check, so
    /// `Alice@Example.com` and `alice@example.com` are the same account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        surname: &str,
    ) -> Result<User> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() || name.is_empty() || surname.is_empty() {
            return Err(ChronicleError::InvalidInput("not enough data provided".into()));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ChronicleError::Conflict("user already exists".into()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash: self.hasher.hash(password)?,
            name: name.to_string(),
            surname: surname.to_string(),
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Authenticate a user and issue a signed token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(ChronicleError::InvalidInput("not enough data provided".into()));
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ChronicleError::NotFound("user not found".into()))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(ChronicleError::Auth("failed to authenticate".into()));
        }

        self.tokens.issue(&user.id)
    }

    /// Delete a user account
    ///
    /// Activity records and project memberships cascade in the store.
    pub async fn delete_account(&self, user_id: &str) -> Result<()> {
        let removed = self.users.delete(user_id).await?;
        if removed == 0 {
            return Err(ChronicleError::NotFound("user not found".into()));
        }
        info!(user_id, "user deleted");
        Ok(())
    }
}
