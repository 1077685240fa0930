//! Account endpoints: registration, login, deletion

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::authenticate;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /user` - register a new user
pub async fn register(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    ctx.accounts.register(&body.email, &body.password, &body.name, &body.surname).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Success" }))))
}

/// `POST /login` - authenticate and issue a token
pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = ctx.accounts.login(&body.email, &body.password).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Success", "token": token }))))
}

/// `DELETE /user` - delete the authenticated user's account
pub async fn delete_user(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user = authenticate(&ctx, &headers).await?;
    ctx.accounts.delete_account(&user.id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Success" }))))
}
