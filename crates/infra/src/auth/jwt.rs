//! JWT implementation of the `TokenCodec` port.
//!
//! Tokens are HS256-signed with `sub`, `iat` and `exp` claims. The validity
//! window defaults to 30 days and is configurable per deployment.

use chronicle_core::TokenCodec;
use chronicle_domain::{ChronicleError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject (user id)
    sub: String,
    /// Expiration time (unix seconds)
    exp: i64,
    /// Issued at (unix seconds)
    iat: i64,
}

/// HS256 token codec
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenCodec {
    /// Create a codec signing with `secret` and issuing tokens valid for
    /// `ttl_days`.
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            ttl: Duration::days(ttl_days),
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, subject: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| ChronicleError::Internal(format!("failed to encode token: {err}")))
    }

    fn verify(&self, token: &str) -> Result<String> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|err| ChronicleError::Auth(format!("invalid token: {err}")))
    }
}
