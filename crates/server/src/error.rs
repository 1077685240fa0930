//! Domain-error to HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chronicle_domain::ChronicleError;
use serde_json::json;
use tracing::error;

/// Wrapper giving domain errors an HTTP representation.
///
/// Handlers return `Result<_, ApiError>` and use `?`; the `From` impl
/// keeps service calls untranslated at the call site.
#[derive(Debug)]
pub struct ApiError(pub ChronicleError);

impl From<ChronicleError> for ApiError {
    fn from(err: ChronicleError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ChronicleError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ChronicleError::Auth(_) => StatusCode::UNAUTHORIZED,
            ChronicleError::NotFound(_) => StatusCode::NOT_FOUND,
            ChronicleError::Conflict(_) => StatusCode::CONFLICT,
            ChronicleError::Database(_)
            | ChronicleError::Config(_)
            | ChronicleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Infrastructure detail stays in the logs, not in the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
            "something bad happened".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
