//! Activity endpoints: submission (single and bulk), deletion, queries

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chronicle_domain::{ActivityPayload, ActivityQuery, ChronicleError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::authenticate;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// A single activity object, or an object carrying an `activities`
    /// array for bulk submission.
    pub activity: Value,
}

#[derive(Debug, Deserialize)]
struct BulkEnvelope {
    activities: Vec<ActivityPayload>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub activity_id: String,
}

#[derive(Debug, Deserialize)]
pub struct FindParams {
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub amount_to_return: usize,
    /// JSON-encoded object of exact-match filters.
    pub filters: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// `POST /activity` - submit one activity or a batch
///
/// The decode step runs once, before any insert is dispatched: a payload
/// that is not a well-formed object is rejected with no partial
/// processing.
pub async fn submit(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(body): Json<SubmitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authenticate(&ctx, &headers).await?;

    let Value::Object(fields) = &body.activity else {
        return Err(ChronicleError::InvalidInput("wrong format".into()).into());
    };

    if fields.contains_key("activities") {
        let envelope: BulkEnvelope = serde_json::from_value(body.activity.clone())
            .map_err(|err| ChronicleError::InvalidInput(format!("wrong format: {err}")))?;
        let ids = ctx.activities.submit_batch(envelope.activities, &user.id).await?;
        return Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Success", "activity_ids": ids })),
        ));
    }

    let payload: ActivityPayload = serde_json::from_value(body.activity.clone())
        .map_err(|err| ChronicleError::InvalidInput(format!("wrong format: {err}")))?;
    let id = ctx.activities.submit(payload, &user.id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Success", "activity_id": id }))))
}

/// `DELETE /activity` - delete one of the caller's activities
pub async fn delete(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(body): Json<DeleteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authenticate(&ctx, &headers).await?;
    ctx.activities.delete(&body.activity_id, &user.id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Success" }))))
}

/// `GET /activity` - query the caller's activities
pub async fn find(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Query(params): Query<FindParams>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authenticate(&ctx, &headers).await?;
    let query = build_query(&params)?;

    let activities = ctx.activities.find_for_user(&user.id, query).await?;
    if activities.is_empty() {
        return Err(ChronicleError::NotFound(
            "activities of current user were not found".into(),
        )
        .into());
    }

    Ok((StatusCode::OK, Json(json!({ "message": "Success", "activities": activities }))))
}

/// Translate wire-level query parameters into a domain query.
pub(crate) fn build_query(params: &FindParams) -> Result<ActivityQuery, ApiError> {
    Ok(ActivityQuery {
        offset: params.offset,
        limit: params.amount_to_return,
        filters: parse_filters(params.filters.as_deref())?,
        start_time: params.start_time,
        end_time: params.end_time,
    })
}

/// Decode the `filters` query parameter.
///
/// Must be a JSON object of scalar values; anything else is a malformed
/// request.
fn parse_filters(raw: Option<&str>) -> Result<BTreeMap<String, String>, ApiError> {
    let Some(raw) = raw else {
        return Ok(BTreeMap::new());
    };

    let value: Value = serde_json::from_str(raw)
        .map_err(|_| ChronicleError::InvalidInput("wrong format for filters".into()))?;
    let Value::Object(fields) = value else {
        return Err(ChronicleError::InvalidInput("wrong format for filters".into()).into());
    };

    let mut filters = BTreeMap::new();
    for (key, value) in fields {
        let text = match value {
            Value::String(text) => text,
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            _ => {
                return Err(ChronicleError::InvalidInput(format!(
                    "filter value for {key} must be a scalar"
                ))
                .into());
            }
        };
        filters.insert(key, text);
    }
    Ok(filters)
}
