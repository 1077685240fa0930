//! Activity service - single-record operations and bulk submission
//!
//! Bulk submission fans one insertion task out per payload, joins on all of
//! them, and compensates successful inserts with deletes when any sibling
//! fails. From the caller's point of view a batch either lands completely
//! or not at all.

use std::sync::Arc;
use std::time::Duration;

use chronicle_domain::constants::{
    ALLOWED_FILTER_KEYS, DEFAULT_ACTIVITIES_PER_QUERY, MAX_ACTIVITIES_PER_QUERY,
    MAX_PROJECT_ACTIVITIES_PER_QUERY,
};
use chronicle_domain::{Activity, ActivityPayload, ActivityQuery, ChronicleError, Result};
use futures::future;
use tracing::{debug, warn};
use uuid::Uuid;

use super::ports::ActivityRepository;

/// Activity service over the record store
pub struct ActivityService {
    repository: Arc<dyn ActivityRepository>,
    insert_timeout: Duration,
}

impl ActivityService {
    /// Create a new activity service with the given per-insert timeout
    pub fn new(repository: Arc<dyn ActivityRepository>, insert_timeout: Duration) -> Self {
        Self { repository, insert_timeout }
    }

    /// Insert a single activity for `user_id`, returning the assigned id
    pub async fn submit(&self, payload: ActivityPayload, user_id: &str) -> Result<String> {
        let activity = payload.into_activity(Uuid::new_v4().to_string(), user_id.to_string());
        self.repository.insert(&activity).await?;
        Ok(activity.id)
    }

    /// Insert a batch of activities for `user_id` with all-or-nothing
    /// semantics
    ///
    /// Inserts run concurrently with no ordering guarantee between their
    /// completions; the returned ids are positionally aligned with the
    /// input payloads. If any insert fails, every insert that succeeded is
    /// compensated with a delete and the first failure is returned. After
    /// this method returns, the records visible under `user_id` from this
    /// call are either the full requested set or the empty set.
    pub async fn submit_batch(
        &self,
        payloads: Vec<ActivityPayload>,
        user_id: &str,
    ) -> Result<Vec<String>> {
        if payloads.is_empty() {
            return Err(ChronicleError::InvalidInput("empty activities list".into()));
        }

        // A single payload needs no coordination: failure already means
        // zero records exist.
        if payloads.len() == 1 {
            let payload = payloads.into_iter().next().ok_or_else(|| {
                ChronicleError::Internal("batch of one produced no payload".into())
            })?;
            return Ok(vec![self.submit(payload, user_id).await?]);
        }

        let activities: Vec<Activity> = payloads
            .into_iter()
            .map(|payload| payload.into_activity(Uuid::new_v4().to_string(), user_id.to_string()))
            .collect();

        // Fan out one independent insertion task per record. Tasks are not
        // cancelled once launched; rollback happens after the join.
        let mut handles = Vec::with_capacity(activities.len());
        for activity in activities {
            let repository = Arc::clone(&self.repository);
            let timeout = self.insert_timeout;
            handles.push(tokio::spawn(async move {
                let id = activity.id.clone();
                match tokio::time::timeout(timeout, repository.insert(&activity)).await {
                    Ok(Ok(())) => Ok(id),
                    Ok(Err(err)) => Err(err),
                    Err(_) => Err(ChronicleError::Database(format!(
                        "insert timed out after {}s",
                        timeout.as_secs()
                    ))),
                }
            }));
        }

        // Barrier: wait for every task. join_all preserves input order, so
        // outcomes stay positionally aligned even though completions
        // interleave.
        let outcomes: Vec<Result<String>> = future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(outcome) => outcome,
                Err(join_err) => {
                    Err(ChronicleError::Internal(format!("insert task failed: {join_err}")))
                }
            })
            .collect();

        // Strict logical AND over every outcome.
        if outcomes.iter().all(Result::is_ok) {
            return Ok(outcomes.into_iter().filter_map(std::result::Result::ok).collect());
        }

        self.rollback_inserted(&outcomes, user_id).await;

        let first_error = outcomes
            .into_iter()
            .find_map(std::result::Result::err)
            .unwrap_or_else(|| ChronicleError::Internal("batch failed with no error".into()));
        Err(first_error)
    }

    /// Delete one activity owned by `user_id`
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(ChronicleError::InvalidInput("empty activity id".into()));
        }
        let removed = self.repository.delete(id, user_id).await?;
        if removed == 0 {
            return Err(ChronicleError::NotFound("activity with this id was not found".into()));
        }
        Ok(())
    }

    /// Query activities owned by a single user
    ///
    /// The limit is capped at 1000 regardless of what the caller requests.
    pub async fn find_for_user(&self, user_id: &str, query: ActivityQuery) -> Result<Vec<Activity>> {
        let query = prepare_query(query, MAX_ACTIVITIES_PER_QUERY)?;
        let owner = [user_id.to_string()];
        self.repository.find(&owner, &query).await
    }

    /// Query activities owned by any of a project's members
    ///
    /// The limit is capped at 10000 regardless of what the caller requests.
    pub async fn find_for_project_members(
        &self,
        owner_ids: &[String],
        query: ActivityQuery,
    ) -> Result<Vec<Activity>> {
        let query = prepare_query(query, MAX_PROJECT_ACTIVITIES_PER_QUERY)?;
        self.repository.find(owner_ids, &query).await
    }

    /// Best-effort compensating deletes for the inserts that succeeded.
    ///
    /// Deletion failures are logged and not escalated: the batch outcome is
    /// already a failure.
    async fn rollback_inserted(&self, outcomes: &[Result<String>], user_id: &str) {
        for id in outcomes.iter().filter_map(|outcome| outcome.as_ref().ok()) {
            match self.repository.delete(id, user_id).await {
                Ok(_) => debug!(activity_id = %id, "rolled back batch insert"),
                Err(err) => {
                    warn!(activity_id = %id, error = %err, "failed to roll back batch insert");
                }
            }
        }
    }
}

/// Validate filter keys and clamp the limit before the query reaches the
/// store.
///
/// Unrecognized filter keys are rejected rather than ignored: a typo'd key
/// would otherwise return unfiltered data that looks filtered.
fn prepare_query(mut query: ActivityQuery, cap: usize) -> Result<ActivityQuery> {
    for key in query.filters.keys() {
        if !ALLOWED_FILTER_KEYS.contains(&key.as_str()) {
            return Err(ChronicleError::InvalidInput(format!("unknown filter key: {key}")));
        }
    }
    if query.limit == 0 {
        query.limit = DEFAULT_ACTIVITIES_PER_QUERY;
    }
    query.limit = query.limit.min(cap);
    Ok(query)
}
