//! HTTP routing

pub mod account;
pub mod activity;
pub mod health;
pub mod project;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;

/// Build the application router over the shared context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::check))
        .route("/user", post(account::register).delete(account::delete_user))
        .route("/login", post(account::login))
        .route(
            "/activity",
            post(activity::submit).delete(activity::delete).get(activity::find),
        )
        .route("/project", post(project::create).get(project::list))
        .route("/project/invite", post(project::invite))
        .route("/project/activities", get(project::activities))
        .with_state(ctx)
}
