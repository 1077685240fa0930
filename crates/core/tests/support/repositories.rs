//! Mock repository implementations for testing
//!
//! Provides in-memory mocks for the core ports, enabling deterministic
//! unit tests without database dependencies.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chronicle_core::account::ports::{PasswordHasher, UserRepository};
use chronicle_core::activity::ports::ActivityRepository;
use chronicle_core::identity::ports::TokenCodec;
use chronicle_core::project::ports::ProjectRepository;
use chronicle_domain::{
    Activity, ActivityQuery, ChronicleError, Project, ProjectMember, Result, User,
};

/// In-memory mock for `ActivityRepository`.
///
/// Inserts can be failed or stalled per executable name to exercise the
/// batch rollback and timeout paths. Every delete call is recorded so
/// tests can assert exactly which compensations were attempted.
#[derive(Default, Clone)]
pub struct MockActivityRepository {
    records: Arc<Mutex<HashMap<String, Activity>>>,
    fail_on: Arc<Mutex<HashSet<String>>>,
    stall_on: Arc<Mutex<HashSet<String>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    last_query_limit: Arc<Mutex<Option<usize>>>,
}

impl MockActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail inserts whose executable name matches.
    pub fn fail_inserts_for(&self, executable: &str) {
        self.fail_on.lock().expect("lock poisoned").insert(executable.to_string());
    }

    /// Stall inserts whose executable name matches (for timeout tests).
    pub fn stall_inserts_for(&self, executable: &str) {
        self.stall_on.lock().expect("lock poisoned").insert(executable.to_string());
    }

    /// Snapshot of currently stored records.
    pub fn stored(&self) -> Vec<Activity> {
        self.records.lock().expect("lock poisoned").values().cloned().collect()
    }

    /// Ids passed to `delete`, in call order.
    pub fn delete_calls(&self) -> Vec<String> {
        self.deleted.lock().expect("lock poisoned").clone()
    }

    /// Limit carried by the most recent `find` call.
    pub fn last_query_limit(&self) -> Option<usize> {
        *self.last_query_limit.lock().expect("lock poisoned")
    }
}

#[async_trait]
impl ActivityRepository for MockActivityRepository {
    async fn insert(&self, activity: &Activity) -> Result<()> {
        let stalled =
            self.stall_on.lock().expect("lock poisoned").contains(&activity.executable_name);
        if stalled {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        let failed = self.fail_on.lock().expect("lock poisoned").contains(&activity.executable_name);
        if failed {
            return Err(ChronicleError::Database("store unavailable".into()));
        }

        self.records
            .lock()
            .expect("lock poisoned")
            .insert(activity.id.clone(), activity.clone());
        Ok(())
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<u64> {
        self.deleted.lock().expect("lock poisoned").push(id.to_string());
        let mut records = self.records.lock().expect("lock poisoned");
        match records.get(id) {
            Some(record) if record.user_id == user_id => {
                records.remove(id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn find(&self, owner_ids: &[String], query: &ActivityQuery) -> Result<Vec<Activity>> {
        *self.last_query_limit.lock().expect("lock poisoned") = Some(query.limit);
        let records = self.records.lock().expect("lock poisoned");
        let mut matches: Vec<Activity> = records
            .values()
            .filter(|activity| owner_ids.contains(&activity.user_id))
            .filter(|activity| {
                query.start_time.map_or(true, |start| activity.start_time >= start)
                    && query.end_time.map_or(true, |end| activity.end_time < end)
            })
            .filter(|activity| {
                query.filters.iter().all(|(key, value)| match key.as_str() {
                    "executable_name" => activity.executable_name == *value,
                    "activity_type" => activity.activity_type.as_deref() == Some(value),
                    "idle_activity" => activity.idle_activity.to_string() == *value,
                    _ => false,
                })
            })
            .cloned()
            .collect();
        matches.sort_by_key(|activity| activity.start_time);
        Ok(matches.into_iter().skip(query.offset).take(query.limit).collect())
    }
}

/// In-memory mock for `UserRepository`.
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience builder for seeding a user.
    pub fn with_user(self, user: User) -> Self {
        self.add_user(user);
        self
    }

    /// Seed a user on an already-shared mock.
    pub fn add_user(&self, user: User) {
        self.users.lock().expect("lock poisoned").insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.lock().expect("lock poisoned").get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .expect("lock poisoned")
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<()> {
        self.users.lock().expect("lock poisoned").insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        Ok(u64::from(self.users.lock().expect("lock poisoned").remove(id).is_some()))
    }
}

/// In-memory mock for `ProjectRepository`.
#[derive(Default, Clone)]
pub struct MockProjectRepository {
    projects: Arc<Mutex<HashMap<String, Project>>>,
    members: Arc<Mutex<Vec<ProjectMember>>>,
}

impl MockProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for MockProjectRepository {
    async fn create(&self, project: &Project) -> Result<()> {
        self.projects
            .lock()
            .expect("lock poisoned")
            .insert(project.id.clone(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.projects.lock().expect("lock poisoned").get(id).cloned())
    }

    async fn add_member(&self, member: &ProjectMember) -> Result<()> {
        self.members.lock().expect("lock poisoned").push(member.clone());
        Ok(())
    }

    async fn is_member(&self, project_id: &str, user_id: &str) -> Result<bool> {
        Ok(self
            .members
            .lock()
            .expect("lock poisoned")
            .iter()
            .any(|member| member.project_id == project_id && member.user_id == user_id))
    }

    async fn member_ids(&self, project_id: &str) -> Result<Vec<String>> {
        Ok(self
            .members
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|member| member.project_id == project_id)
            .map(|member| member.user_id.clone())
            .collect())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Project>> {
        let members = self.members.lock().expect("lock poisoned");
        let projects = self.projects.lock().expect("lock poisoned");
        Ok(members
            .iter()
            .filter(|member| member.user_id == user_id)
            .filter_map(|member| projects.get(&member.project_id).cloned())
            .collect())
    }
}

/// Deterministic token codec: `tok-<subject>`, with an optional set of
/// subjects whose tokens read as expired.
#[derive(Default, Clone)]
pub struct MockTokenCodec {
    expired_subjects: Arc<Mutex<HashSet<String>>>,
}

impl MockTokenCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat tokens for `subject` as expired from now on.
    pub fn expire_subject(&self, subject: &str) {
        self.expired_subjects.lock().expect("lock poisoned").insert(subject.to_string());
    }
}

impl TokenCodec for MockTokenCodec {
    fn issue(&self, subject: &str) -> Result<String> {
        Ok(format!("tok-{subject}"))
    }

    fn verify(&self, token: &str) -> Result<String> {
        let subject = token
            .strip_prefix("tok-")
            .ok_or_else(|| ChronicleError::Auth("invalid token".into()))?;
        let expired = self.expired_subjects.lock().expect("lock poisoned").contains(subject);
        if expired {
            return Err(ChronicleError::Auth("token expired".into()));
        }
        Ok(subject.to_string())
    }
}

/// Transparent password hasher for service-level tests.
#[derive(Default, Clone)]
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}
