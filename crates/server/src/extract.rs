//! Bearer-token authentication helper

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use chronicle_domain::constants::TOKEN_SCHEME_PREFIX;
use chronicle_domain::{Result, User};

use crate::context::AppContext;

/// Resolve the request's `Authorization: Token <jwt>` header to a user.
///
/// The scheme prefix is stripped before resolution; a missing header
/// resolves like an empty token and yields an `Auth` error.
pub async fn authenticate(ctx: &AppContext, headers: &HeaderMap) -> Result<User> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix(TOKEN_SCHEME_PREFIX).unwrap_or(value))
        .unwrap_or_default();

    ctx.identity.resolve(token).await
}
