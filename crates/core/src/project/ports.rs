//! Port interfaces for project persistence

use async_trait::async_trait;
use chronicle_domain::{Project, ProjectMember, Result};

/// Trait for project and membership persistence
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Create a new project
    async fn create(&self, project: &Project) -> Result<()>;

    /// Get a project by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Project>>;

    /// Add a member to a project
    async fn add_member(&self, member: &ProjectMember) -> Result<()>;

    /// Check whether a user belongs to a project
    async fn is_member(&self, project_id: &str, user_id: &str) -> Result<bool>;

    /// List the user ids of all project members
    async fn member_ids(&self, project_id: &str) -> Result<Vec<String>>;

    /// List the projects a user belongs to
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Project>>;
}
