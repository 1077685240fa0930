//! Project service tests: creation, invitations, scoped queries, caps

mod support;

use std::sync::Arc;
use std::time::Duration;

use chronicle_core::{ActivityService, ProjectService};
use chronicle_domain::{ActivityQuery, ChronicleError, User};
use chrono::Utc;
use support::repositories::{MockActivityRepository, MockProjectRepository, MockUserRepository};
use support::sample_payload;

struct Fixture {
    users: MockUserRepository,
    activity_repo: MockActivityRepository,
    activities: Arc<ActivityService>,
    projects: ProjectService,
}

fn fixture() -> Fixture {
    let users = MockUserRepository::new();
    let activity_repo = MockActivityRepository::new();
    let activities =
        Arc::new(ActivityService::new(Arc::new(activity_repo.clone()), Duration::from_secs(30)));
    let projects = ProjectService::new(
        Arc::new(MockProjectRepository::new()),
        Arc::new(users.clone()),
        Arc::clone(&activities),
    );
    Fixture { users, activity_repo, activities, projects }
}

fn sample_user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        password_hash: "hashed:secret".to_string(),
        name: "Ada".to_string(),
        surname: "Lovelace".to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn creator_becomes_manager_and_member() {
    let fx = fixture();
    let project = fx.projects.create("Metrics", "user-1").await.expect("project created");

    assert_eq!(project.manager_id, "user-1");
    let listed = fx.projects.list_for_user("user-1").await.expect("list ok");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, project.id);
}

#[tokio::test]
async fn invite_adds_member_and_rejects_duplicates() {
    let fx = fixture();
    fx.users.add_user(sample_user("user-2", "grace@example.com"));
    let project = fx.projects.create("Metrics", "user-1").await.expect("project created");

    fx.projects.invite(&project.id, "user-1", "Grace@Example.com").await.expect("invite ok");
    let err = fx
        .projects
        .invite(&project.id, "user-1", "grace@example.com")
        .await
        .expect_err("duplicate invite rejected");
    assert!(matches!(err, ChronicleError::Conflict(_)));
}

#[tokio::test]
async fn non_member_cannot_invite() {
    let fx = fixture();
    fx.users.add_user(sample_user("user-2", "grace@example.com"));
    let project = fx.projects.create("Metrics", "user-1").await.expect("project created");

    let err = fx
        .projects
        .invite(&project.id, "outsider", "grace@example.com")
        .await
        .expect_err("outsider rejected");
    assert!(matches!(err, ChronicleError::Auth(_)));
}

#[tokio::test]
async fn inviting_unknown_email_is_not_found() {
    let fx = fixture();
    let project = fx.projects.create("Metrics", "user-1").await.expect("project created");

    let err = fx
        .projects
        .invite(&project.id, "user-1", "ghost@example.com")
        .await
        .expect_err("unknown invitee rejected");
    assert!(matches!(err, ChronicleError::NotFound(_)));
}

#[tokio::test]
async fn project_query_spans_member_activities_and_excludes_outsiders() {
    let fx = fixture();
    fx.users.add_user(sample_user("user-2", "grace@example.com"));
    let project = fx.projects.create("Metrics", "user-1").await.expect("project created");
    fx.projects.invite(&project.id, "user-1", "grace@example.com").await.expect("invite ok");

    fx.activities.submit(sample_payload("firefox", 0), "user-1").await.expect("insert ok");
    fx.activities.submit(sample_payload("code", 700), "user-2").await.expect("insert ok");
    fx.activities.submit(sample_payload("slack", 1400), "outsider").await.expect("insert ok");

    let found = fx
        .projects
        .find_project_activities(&project.id, "user-1", ActivityQuery::default())
        .await
        .expect("query ok");
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|activity| activity.user_id != "outsider"));
}

#[tokio::test]
async fn non_member_cannot_query_project_activities() {
    let fx = fixture();
    let project = fx.projects.create("Metrics", "user-1").await.expect("project created");

    let err = fx
        .projects
        .find_project_activities(&project.id, "outsider", ActivityQuery::default())
        .await
        .expect_err("outsider rejected");
    assert!(matches!(err, ChronicleError::Auth(_)));
}

#[tokio::test]
async fn unknown_filter_key_is_rejected() {
    let fx = fixture();
    let mut query = ActivityQuery::default();
    query.filters.insert("no_such_field".to_string(), "value".to_string());

    let err = fx.activities.find_for_user("user-1", query).await.expect_err("filter rejected");
    assert!(matches!(err, ChronicleError::InvalidInput(_)));
}

#[tokio::test]
async fn query_caps_are_enforced_per_scope() {
    let fx = fixture();
    let project = fx.projects.create("Metrics", "user-1").await.expect("project created");

    // The store must see the clamped limit, not the requested one.
    let oversized = ActivityQuery { limit: 5000, ..ActivityQuery::default() };
    fx.activities.find_for_user("user-1", oversized).await.expect("query ok");
    assert_eq!(fx.activity_repo.last_query_limit(), Some(1000));

    let oversized = ActivityQuery { limit: 50_000, ..ActivityQuery::default() };
    fx.projects
        .find_project_activities(&project.id, "user-1", oversized)
        .await
        .expect("query ok");
    assert_eq!(fx.activity_repo.last_query_limit(), Some(10_000));
}
