//! Account service tests: registration, login, deletion

mod support;

use std::sync::Arc;

use chronicle_core::{AccountService, UserRepository};
use chronicle_domain::ChronicleError;
use support::repositories::{MockPasswordHasher, MockTokenCodec, MockUserRepository};

fn service(users: &MockUserRepository) -> AccountService {
    AccountService::new(
        Arc::new(users.clone()),
        Arc::new(MockPasswordHasher),
        Arc::new(MockTokenCodec::new()),
    )
}

#[tokio::test]
async fn registration_lowercases_email() {
    let users = MockUserRepository::new();
    let service = service(&users);

    let user = service
        .register("Ada.Lovelace@Example.COM", "secret", "Ada", "Lovelace")
        .await
        .expect("registration succeeds");

    assert_eq!(user.email, "ada.lovelace@example.com");
    let stored = users.find_by_email("ada.lovelace@example.com").await.expect("lookup ok");
    assert!(stored.is_some());
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let users = MockUserRepository::new();
    let service = service(&users);

    service
        .register("ada@example.com", "secret", "Ada", "Lovelace")
        .await
        .expect("first registration succeeds");
    let err = service
        .register("ADA@example.com", "other", "Augusta", "King")
        .await
        .expect_err("duplicate rejected");
    assert!(matches!(err, ChronicleError::Conflict(_)));
}

#[tokio::test]
async fn registration_requires_all_fields() {
    let service = service(&MockUserRepository::new());

    let err = service.register("ada@example.com", "", "Ada", "Lovelace").await.expect_err("rejected");
    assert!(matches!(err, ChronicleError::InvalidInput(_)));
}

#[tokio::test]
async fn login_issues_token_for_valid_credentials() {
    let users = MockUserRepository::new();
    let service = service(&users);
    let user =
        service.register("ada@example.com", "secret", "Ada", "Lovelace").await.expect("registered");

    let token = service.login("Ada@Example.com", "secret").await.expect("login succeeds");
    assert_eq!(token, format!("tok-{}", user.id));
}

#[tokio::test]
async fn login_with_wrong_password_is_auth_error() {
    let users = MockUserRepository::new();
    let service = service(&users);
    service.register("ada@example.com", "secret", "Ada", "Lovelace").await.expect("registered");

    let err = service.login("ada@example.com", "wrong").await.expect_err("login fails");
    assert!(matches!(err, ChronicleError::Auth(_)));
}

#[tokio::test]
async fn login_with_unknown_email_is_not_found() {
    let service = service(&MockUserRepository::new());

    let err = service.login("ghost@example.com", "secret").await.expect_err("login fails");
    assert!(matches!(err, ChronicleError::NotFound(_)));
}

#[tokio::test]
async fn delete_account_removes_user() {
    let users = MockUserRepository::new();
    let service = service(&users);
    let user =
        service.register("ada@example.com", "secret", "Ada", "Lovelace").await.expect("registered");

    service.delete_account(&user.id).await.expect("deletion succeeds");
    let err = service.delete_account(&user.id).await.expect_err("second deletion fails");
    assert!(matches!(err, ChronicleError::NotFound(_)));
}
