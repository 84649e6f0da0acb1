//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::web::state::AppState;

/// Pulls the session token out of the `session` cookie, if any.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?
        .split(';')
        .find_map(|c| c.trim().strip_prefix("session="))
}

/// Middleware that validates the session cookie and extracts the user.
///
/// If valid, inserts the domain `User` into request extensions for handlers
/// to use. If invalid, missing, or expired, returns 401 Unauthorized. The
/// session manager evicts expired entries during this check.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = session_token(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let user = state.sessions.validate(token).await.map_err(|e| {
        debug!("session validation failed: {e}");
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
