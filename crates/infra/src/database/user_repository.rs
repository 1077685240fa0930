//! SQLite-backed user repository.
//!
//! Implements the async `UserRepository` port over the shared connection
//! pool provided by `DbManager`. Lookups by email expect an
//! already-lowercased value; the unique index on `email` enforces
//! case-insensitive uniqueness given that convention.

use std::sync::Arc;

use async_trait::async_trait;
use chronicle_core::UserRepository as UserRepositoryPort;
use chronicle_domain::{Result as DomainResult, User};
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use super::{datetime_from_column, map_join_error};

/// Async user repository backed by SQLite.
pub struct SqliteUserRepository {
    db: Arc<DbManager>,
}

impl SqliteUserRepository {
    /// Construct a repository backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

const INSERT_USER_SQL: &str = "INSERT INTO users (
        id, email, password_hash, name, surname, created_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_USER_BY_ID_SQL: &str = "SELECT id, email, password_hash, name, surname, created_at
    FROM users WHERE id = ?1";

const SELECT_USER_BY_EMAIL_SQL: &str = "SELECT id, email, password_hash, name, surname, created_at
    FROM users WHERE email = ?1";

const DELETE_USER_SQL: &str = "DELETE FROM users WHERE id = ?1";

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || -> DomainResult<Option<User>> {
            let conn = db.get_connection()?;
            conn.query_row(SELECT_USER_BY_ID_SQL, params![id], map_user_row)
                .optional()
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();
        task::spawn_blocking(move || -> DomainResult<Option<User>> {
            let conn = db.get_connection()?;
            conn.query_row(SELECT_USER_BY_EMAIL_SQL, params![email], map_user_row)
                .optional()
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, user: &User) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let user = user.clone();
        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_USER_SQL,
                params![
                    user.id,
                    user.email,
                    user.password_hash,
                    user.name,
                    user.surname,
                    user.created_at.timestamp(),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: &str) -> DomainResult<u64> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || -> DomainResult<u64> {
            let conn = db.get_connection()?;
            let removed = conn.execute(DELETE_USER_SQL, params![id]).map_err(map_sql_error)?;
            Ok(removed as u64)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        name: row.get(3)?,
        surname: row.get(4)?,
        created_at: datetime_from_column(5, row.get(5)?)?,
    })
}
