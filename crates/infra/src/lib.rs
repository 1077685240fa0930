//! # Chronicle Infrastructure
//!
//! Adapter implementations for the core ports: SQLite-backed repositories,
//! JWT credential codec, Argon2 password hashing, and configuration
//! loading.

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;

pub use auth::{Argon2PasswordHasher, JwtTokenCodec};
pub use database::{
    DbManager, SqliteActivityRepository, SqliteProjectRepository, SqliteUserRepository,
};
pub use errors::InfraError;
