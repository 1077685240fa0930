//! Project endpoints: creation, invitations, scoped activity queries

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::activity::{build_query, FindParams};
use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::authenticate;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub project_id: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectActivityParams {
    pub project_id: String,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub amount_to_return: usize,
    pub filters: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// `POST /project` - create a project managed by the caller
pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(body): Json<CreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authenticate(&ctx, &headers).await?;
    let project = ctx.projects.create(&body.name, &user.id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Success", "project": project }))))
}

/// `GET /project` - list the caller's projects
pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user = authenticate(&ctx, &headers).await?;
    let projects = ctx.projects.list_for_user(&user.id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Success", "projects": projects }))))
}

/// `POST /project/invite` - invite another user by email
pub async fn invite(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(body): Json<InviteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authenticate(&ctx, &headers).await?;
    ctx.projects.invite(&body.project_id, &user.id, &body.email).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Success" }))))
}

/// `GET /project/activities` - query activities across project members
pub async fn activities(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Query(params): Query<ProjectActivityParams>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authenticate(&ctx, &headers).await?;

    let find_params = FindParams {
        offset: params.offset,
        amount_to_return: params.amount_to_return,
        filters: params.filters.clone(),
        start_time: params.start_time,
        end_time: params.end_time,
    };
    let query = build_query(&find_params)?;

    let activities =
        ctx.projects.find_project_activities(&params.project_id, &user.id, query).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Success", "activities": activities }))))
}
