//! SQLite-backed activity record repository.
//!
//! Implements the async `ActivityRepository` port used by the activity
//! service. All queries operate on the shared connection pool provided by
//! `DbManager`; async entry points bridge onto it with `spawn_blocking`.
//!
//! Each insert is a single-row statement. Nothing here spans a batch with
//! a transaction: all-or-nothing batch semantics live above this port.

use std::sync::Arc;

use async_trait::async_trait;
use chronicle_core::ActivityRepository as ActivityRepositoryPort;
use chronicle_domain::{Activity, ActivityQuery, ChronicleError, Result as DomainResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use super::{datetime_from_column, map_join_error};

/// Async activity repository backed by SQLite.
pub struct SqliteActivityRepository {
    db: Arc<DbManager>,
}

impl SqliteActivityRepository {
    /// Construct a repository backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

const INSERT_ACTIVITY_SQL: &str = "INSERT INTO activities (
        id, user_id, start_time, end_time, executable_name,
        browser_url, browser_title, ip_address, mac_address,
        idle_activity, activity_type, extra_json
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";

const DELETE_ACTIVITY_SQL: &str = "DELETE FROM activities WHERE id = ?1 AND user_id = ?2";

const SELECT_ACTIVITY_COLUMNS: &str = "SELECT id, user_id, start_time, end_time,
        executable_name, browser_url, browser_title, ip_address, mac_address,
        idle_activity, activity_type, extra_json
    FROM activities";

#[async_trait]
impl ActivityRepositoryPort for SqliteActivityRepository {
    async fn insert(&self, activity: &Activity) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let activity = activity.clone();
        let extra_json = serde_json::to_string(&activity.extra)
            .map_err(|err| ChronicleError::InvalidInput(format!("invalid extra fields: {err}")))?;

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_ACTIVITY_SQL,
                params![
                    activity.id,
                    activity.user_id,
                    activity.start_time.timestamp(),
                    activity.end_time.timestamp(),
                    activity.executable_name,
                    activity.browser_url,
                    activity.browser_title,
                    activity.ip_address,
                    activity.mac_address,
                    i64::from(activity.idle_activity),
                    activity.activity_type,
                    extra_json,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: &str, user_id: &str) -> DomainResult<u64> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        let user_id = user_id.to_string();
        task::spawn_blocking(move || -> DomainResult<u64> {
            let conn = db.get_connection()?;
            let removed = conn
                .execute(DELETE_ACTIVITY_SQL, params![id, user_id])
                .map_err(map_sql_error)?;
            Ok(removed as u64)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find(
        &self,
        owner_ids: &[String],
        query: &ActivityQuery,
    ) -> DomainResult<Vec<Activity>> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db = Arc::clone(&self.db);
        let (sql, params) = build_find_query(owner_ids, query)?;
        task::spawn_blocking(move || -> DomainResult<Vec<Activity>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params_from_iter(params), map_activity_row)
                .map_err(map_sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

/// Assemble the dynamic SELECT for a find call.
///
/// Owner ids become an `IN` list; time bounds are half-open
/// (`start_time >= ?`, `end_time < ?`); each recognized filter key maps to
/// an exact-match clause on its column. An unrecognized key is rejected
/// here as well, so the policy holds even for callers that skip the
/// service layer.
fn build_find_query(
    owner_ids: &[String],
    query: &ActivityQuery,
) -> DomainResult<(String, Vec<Value>)> {
    let mut params: Vec<Value> = Vec::new();

    let placeholders = vec!["?"; owner_ids.len()].join(", ");
    let mut sql = format!("{SELECT_ACTIVITY_COLUMNS} WHERE user_id IN ({placeholders})");
    params.extend(owner_ids.iter().map(|id| Value::Text(id.clone())));

    if let Some(start) = query.start_time {
        sql.push_str(" AND start_time >= ?");
        params.push(Value::Integer(start.timestamp()));
    }
    if let Some(end) = query.end_time {
        sql.push_str(" AND end_time < ?");
        params.push(Value::Integer(end.timestamp()));
    }

    for (key, value) in &query.filters {
        match key.as_str() {
            "executable_name" | "browser_url" | "browser_title" | "ip_address" | "mac_address"
            | "activity_type" => {
                sql.push_str(&format!(" AND {key} = ?"));
                params.push(Value::Text(value.clone()));
            }
            "idle_activity" => {
                let flag = parse_bool_filter(value)?;
                sql.push_str(" AND idle_activity = ?");
                params.push(Value::Integer(i64::from(flag)));
            }
            other => {
                return Err(ChronicleError::InvalidInput(format!("unknown filter key: {other}")));
            }
        }
    }

    sql.push_str(" ORDER BY start_time LIMIT ? OFFSET ?");
    params.push(Value::Integer(clamp_to_i64(query.limit)));
    params.push(Value::Integer(clamp_to_i64(query.offset)));

    Ok((sql, params))
}

fn parse_bool_filter(value: &str) -> DomainResult<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ChronicleError::InvalidInput(format!(
            "idle_activity filter expects a boolean, got: {other}"
        ))),
    }
}

fn clamp_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn map_activity_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
    let extra_json: String = row.get(11)?;
    let extra = serde_json::from_str(&extra_json).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(11, rusqlite::types::Type::Text, Box::new(err))
    })?;

    Ok(Activity {
        id: row.get(0)?,
        user_id: row.get(1)?,
        start_time: datetime_from_column(2, row.get(2)?)?,
        end_time: datetime_from_column(3, row.get(3)?)?,
        executable_name: row.get(4)?,
        browser_url: row.get(5)?,
        browser_title: row.get(6)?,
        ip_address: row.get(7)?,
        mac_address: row.get(8)?,
        idle_activity: row.get::<_, i64>(9)? != 0,
        activity_type: row.get(10)?,
        extra,
    })
}
