//! Port interfaces for activity persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chronicle_domain::{Activity, ActivityQuery, Result};

/// Trait for persisting and querying activity records
///
/// Each insert is an independent single-record operation: no cross-record
/// locking or transaction spans a batch. All-or-nothing batch semantics are
/// approximated above this port with compensating deletes.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Persist one record atomically
    async fn insert(&self, activity: &Activity) -> Result<()>;

    /// Delete a record owned by `user_id`, returning rows affected
    ///
    /// Zero rows is a normal, reportable outcome (the record does not
    /// exist under that owner), distinct from an infrastructure error.
    async fn delete(&self, id: &str, user_id: &str) -> Result<u64>;

    /// Find records owned by any of `owner_ids`, ordered by start time
    ///
    /// Filter keys are validated by the caller; the repository only sees
    /// recognized structured fields.
    async fn find(&self, owner_ids: &[String], query: &ActivityQuery) -> Result<Vec<Activity>>;
}
