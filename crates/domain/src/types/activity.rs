//! Activity record types
//!
//! An activity is one observed interval of application or browser usage.
//! Clients may attach arbitrary extra fields; these are preserved verbatim
//! and round-tripped through the store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Persisted activity record
///
/// Ownership (`user_id`) is assigned at creation time and immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub executable_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_title: Option<String>,
    pub ip_address: String,
    pub mac_address: String,
    #[serde(default)]
    pub idle_activity: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    /// Additional client-supplied fields, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Incoming activity data before it becomes a persisted record
///
/// Serde enforces the object shape; any non-object payload fails to decode
/// and is rejected before dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPayload {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub executable_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_title: Option<String>,
    pub ip_address: String,
    pub mac_address: String,
    #[serde(default)]
    pub idle_activity: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActivityPayload {
    /// Materialize the payload into a record owned by `user_id`.
    pub fn into_activity(self, id: String, user_id: String) -> Activity {
        Activity {
            id,
            user_id,
            start_time: self.start_time,
            end_time: self.end_time,
            executable_name: self.executable_name,
            browser_url: self.browser_url,
            browser_title: self.browser_title,
            ip_address: self.ip_address,
            mac_address: self.mac_address,
            idle_activity: self.idle_activity,
            activity_type: self.activity_type,
            extra: self.extra,
        }
    }
}

/// Parameters for an activity query
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub offset: usize,
    pub limit: usize,
    /// Exact-match filters over structured activity fields.
    pub filters: BTreeMap<String, String>,
    /// Minimum start time (inclusive).
    pub start_time: Option<DateTime<Utc>>,
    /// Maximum end time (exclusive).
    pub end_time: Option<DateTime<Utc>>,
}
