//! SQLite-backed project and membership repository.

use std::sync::Arc;

use async_trait::async_trait;
use chronicle_core::ProjectRepository as ProjectRepositoryPort;
use chronicle_domain::{Project, ProjectMember, Result as DomainResult};
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use super::{datetime_from_column, map_join_error};

/// Async project repository backed by SQLite.
pub struct SqliteProjectRepository {
    db: Arc<DbManager>,
}

impl SqliteProjectRepository {
    /// Construct a repository backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

const INSERT_PROJECT_SQL: &str = "INSERT INTO projects (
        id, name, manager_id, created_at
    ) VALUES (?1, ?2, ?3, ?4)";

const SELECT_PROJECT_SQL: &str =
    "SELECT id, name, manager_id, created_at FROM projects WHERE id = ?1";

const INSERT_MEMBER_SQL: &str = "INSERT INTO project_members (
        project_id, user_id, invited_at
    ) VALUES (?1, ?2, ?3)";

const MEMBER_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM project_members WHERE project_id = ?1 AND user_id = ?2)";

const MEMBER_IDS_SQL: &str =
    "SELECT user_id FROM project_members WHERE project_id = ?1 ORDER BY invited_at";

const PROJECTS_FOR_USER_SQL: &str = "SELECT p.id, p.name, p.manager_id, p.created_at
    FROM projects p
    JOIN project_members m ON m.project_id = p.id
    WHERE m.user_id = ?1
    ORDER BY p.created_at";

#[async_trait]
impl ProjectRepositoryPort for SqliteProjectRepository {
    async fn create(&self, project: &Project) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let project = project.clone();
        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_PROJECT_SQL,
                params![
                    project.id,
                    project.name,
                    project.manager_id,
                    project.created_at.timestamp(),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Project>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || -> DomainResult<Option<Project>> {
            let conn = db.get_connection()?;
            conn.query_row(SELECT_PROJECT_SQL, params![id], map_project_row)
                .optional()
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn add_member(&self, member: &ProjectMember) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let member = member.clone();
        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_MEMBER_SQL,
                params![member.project_id, member.user_id, member.invited_at.timestamp()],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn is_member(&self, project_id: &str, user_id: &str) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let project_id = project_id.to_string();
        let user_id = user_id.to_string();
        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let exists: i64 = conn
                .query_row(MEMBER_EXISTS_SQL, params![project_id, user_id], |row| row.get(0))
                .map_err(map_sql_error)?;
            Ok(exists != 0)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn member_ids(&self, project_id: &str) -> DomainResult<Vec<String>> {
        let db = Arc::clone(&self.db);
        let project_id = project_id.to_string();
        task::spawn_blocking(move || -> DomainResult<Vec<String>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(MEMBER_IDS_SQL).map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![project_id], |row| row.get::<_, String>(0))
                .map_err(map_sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<Project>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        task::spawn_blocking(move || -> DomainResult<Vec<Project>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(PROJECTS_FOR_USER_SQL).map_err(map_sql_error)?;
            let rows = stmt.query_map(params![user_id], map_project_row).map_err(map_sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        manager_id: row.get(2)?,
        created_at: datetime_from_column(3, row.get(3)?)?,
    })
}
