//! Database implementations

pub mod activity_repository;
pub mod manager;
pub mod project_repository;
pub mod user_repository;

pub use activity_repository::SqliteActivityRepository;
pub use manager::DbManager;
pub use project_repository::SqliteProjectRepository;
pub use user_repository::SqliteUserRepository;

use chrono::{DateTime, Utc};

/// Convert a stored unix-seconds column into a UTC datetime.
///
/// Out-of-range values surface as a row-conversion error instead of a
/// panic.
pub(crate) fn datetime_from_column(idx: usize, secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, secs))
}

/// Map a blocking-task join failure into a domain error.
pub(crate) fn map_join_error(err: tokio::task::JoinError) -> chronicle_domain::ChronicleError {
    if err.is_cancelled() {
        chronicle_domain::ChronicleError::Internal("blocking repository task cancelled".into())
    } else {
        chronicle_domain::ChronicleError::Internal(format!("blocking repository task failed: {err}"))
    }
}
