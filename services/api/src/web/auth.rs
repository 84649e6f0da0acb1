//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for login, logout, and the current-user summary.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::error::port_error_response;
use crate::web::middleware::session_token;
use crate::web::state::AppState;
use zoo_records_core::domain::{Role, User};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub password: String,
}

/// The public view of a user: everything except the email.
#[derive(Serialize, ToSchema)]
pub struct UserSummary {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[schema(value_type = String)]
    pub role: Role,
    pub name: String,
}

impl UserSummary {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            user_id: user.user_id.clone(),
            role: user.role,
            name: user.name.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserSummary,
}

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/login - Authenticate and receive a session cookie
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = state
        .sessions
        .login(&req.user_id, &req.password)
        .await
        .map_err(port_error_response)?;

    info!(user = %session.user.user_id, role = %session.user.role.as_str(), "login");

    let max_age = state.config.session_ttl_hours * 60 * 60;
    let cookie = format!(
        "session={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        session.token, max_age
    );

    let response = LoginResponse {
        user: UserSummary::from_user(&session.user),
    };

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(response),
    ))
}

/// POST /auth/logout - Invalidate the session; 200 whether or not one existed
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful", body = LogoutResponse)
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if let Some(token) = session_token(&headers) {
        state
            .sessions
            .logout(token)
            .await
            .map_err(port_error_response)?;
    }

    let cookie = "session=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0";
    let response = LogoutResponse {
        message: "Logged out successfully".to_string(),
    };

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(response),
    ))
}

/// GET /auth/user - Summary of the authenticated caller
#[utoipa::path(
    get,
    path = "/auth/user",
    responses(
        (status = 200, description = "Current user", body = UserSummary),
        (status = 401, description = "No valid session")
    )
)]
pub async fn current_user_handler(Extension(user): Extension<User>) -> Json<UserSummary> {
    Json(UserSummary::from_user(&user))
}
