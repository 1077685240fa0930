//! Liveness endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::context::AppContext;
use crate::error::ApiError;

/// `GET /health` - liveness plus a database round-trip
pub async fn check(State(ctx): State<Arc<AppContext>>) -> Result<impl IntoResponse, ApiError> {
    let db = Arc::clone(&ctx.db);
    tokio::task::spawn_blocking(move || db.health_check())
        .await
        .map_err(|err| chronicle_domain::ChronicleError::Internal(err.to_string()))??;
    Ok((StatusCode::OK, Json(json!({ "status": "ok" }))))
}
