//! Identity resolution service

use std::sync::Arc;

use chronicle_domain::{ChronicleError, Result, User};

use super::ports::TokenCodec;
use crate::account::ports::UserRepository;

/// Resolves a bearer token to an authenticated user
///
/// Every failure mode collapses to an `Auth` error: a caller can not
/// distinguish a bad signature from an expired token or a deleted user.
pub struct IdentityService {
    tokens: Arc<dyn TokenCodec>,
    users: Arc<dyn UserRepository>,
}

impl IdentityService {
    /// Create a new identity service
    pub fn new(tokens: Arc<dyn TokenCodec>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Resolve a token to the user it identifies
    ///
    /// Read-only; no side effects.
    pub async fn resolve(&self, token: &str) -> Result<User> {
        if token.is_empty() {
            return Err(ChronicleError::Auth("missing credentials".into()));
        }

        let subject = self
            .tokens
            .verify(token)
            .map_err(|_| ChronicleError::Auth("invalid or expired token".into()))?;

        match self.users.find_by_id(&subject).await? {
            Some(user) => Ok(user),
            None => Err(ChronicleError::Auth("unknown subject".into())),
        }
    }
}
