pub mod auth;
pub mod intake;
pub mod middleware;
pub mod state;
pub mod submissions;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::web::state::AppState;

pub use middleware::require_auth;
pub use submissions::ApiDoc;

/// Builds the full API router: public auth routes plus the session-guarded
/// workflow routes. Tests drive this router directly with `oneshot`.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Public routes (no auth required). Logout is public so a stale cookie
    // still gets cleared with a 200.
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/user", get(auth::current_user_handler))
        .route("/submissions/audio", post(submissions::upload_audio_handler))
        .route("/submissions/my", get(submissions::list_my_handler))
        .route("/submissions/all", get(submissions::list_all_handler))
        .route(
            "/submissions/{id}",
            get(submissions::get_submission_handler).put(submissions::update_submission_handler),
        )
        .route(
            "/submissions/{id}/comments",
            post(submissions::add_comment_handler),
        )
        .route(
            "/submissions/{id}/download",
            get(submissions::download_report_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state)
}
