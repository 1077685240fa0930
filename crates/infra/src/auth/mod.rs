//! Credential adapters: JWT codec and password hashing

mod jwt;
mod password;

pub use jwt::JwtTokenCodec;
pub use password::Argon2PasswordHasher;
