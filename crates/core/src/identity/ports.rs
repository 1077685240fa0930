//! Port interfaces for credential handling

use chronicle_domain::Result;

/// Trait for issuing and verifying signed, time-limited credentials
///
/// Kept synchronous: signing and verification are pure computation.
pub trait TokenCodec: Send + Sync {
    /// Issue a signed token embedding the subject identifier
    fn issue(&self, subject: &str) -> Result<String>;

    /// Verify signature and expiry, returning the embedded subject
    ///
    /// Any verification failure (bad signature, expired, malformed) is an
    /// `Auth` error.
    fn verify(&self, token: &str) -> Result<String>;
}
