//! Project types
//!
//! A project is a named collection owned by its creating user (the manager).
//! Membership extends read access to other members' activity data scoped to
//! the project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub manager_id: String,
    pub created_at: DateTime<Utc>,
}

/// Membership record linking a user to a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMember {
    pub project_id: String,
    pub user_id: String,
    pub invited_at: DateTime<Utc>,
}
