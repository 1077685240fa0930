//! Project service - creation, invitations, scoped activity queries

use std::sync::Arc;

use chronicle_domain::{
    Activity, ActivityQuery, ChronicleError, Project, ProjectMember, Result,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::ports::ProjectRepository;
use crate::account::ports::UserRepository;
use crate::activity::ActivityService;

/// Project service
pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
    activities: Arc<ActivityService>,
}

impl ProjectService {
    /// Create a new project service
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserRepository>,
        activities: Arc<ActivityService>,
    ) -> Self {
        Self { projects, users, activities }
    }

    /// Create a project managed by `manager_id`
    ///
    /// The manager becomes the first member.
    pub async fn create(&self, name: &str, manager_id: &str) -> Result<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChronicleError::InvalidInput("empty project name".into()));
        }

        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            manager_id: manager_id.to_string(),
            created_at: Utc::now(),
        };
        self.projects.create(&project).await?;
        self.projects
            .add_member(&ProjectMember {
                project_id: project.id.clone(),
                user_id: manager_id.to_string(),
                invited_at: project.created_at,
            })
            .await?;

        info!(project_id = %project.id, manager_id, "project created");
        Ok(project)
    }

    /// Invite a user (by email) into a project
    ///
    /// Only existing members may invite.
    pub async fn invite(
        &self,
        project_id: &str,
        inviter_id: &str,
        invitee_email: &str,
    ) -> Result<()> {
        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(ChronicleError::NotFound("project not found".into()));
        }
        if !self.projects.is_member(project_id, inviter_id).await? {
            return Err(ChronicleError::Auth("not a member of this project".into()));
        }

        let email = invitee_email.trim().to_lowercase();
        let invitee = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ChronicleError::NotFound("user not found".into()))?;

        if self.projects.is_member(project_id, &invitee.id).await? {
            return Err(ChronicleError::Conflict("user is already a member".into()));
        }

        self.projects
            .add_member(&ProjectMember {
                project_id: project_id.to_string(),
                user_id: invitee.id.clone(),
                invited_at: Utc::now(),
            })
            .await?;

        info!(project_id, invitee_id = %invitee.id, "user invited to project");
        Ok(())
    }

    /// Query activities of all project members
    ///
    /// The caller must be a member; results are capped at the
    /// project-scoped maximum.
    pub async fn find_project_activities(
        &self,
        project_id: &str,
        caller_id: &str,
        query: ActivityQuery,
    ) -> Result<Vec<Activity>> {
        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(ChronicleError::NotFound("project not found".into()));
        }
        if !self.projects.is_member(project_id, caller_id).await? {
            return Err(ChronicleError::Auth("not a member of this project".into()));
        }

        let owner_ids = self.projects.member_ids(project_id).await?;
        self.activities.find_for_project_members(&owner_ids, query).await
    }

    /// List the projects a user belongs to
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Project>> {
        self.projects.list_for_user(user_id).await
    }
}
