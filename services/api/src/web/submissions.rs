//! services/api/src/web/submissions.rs
//!
//! Contains the Axum handlers for the submission workflow endpoints and the
//! master definition for the OpenAPI specification.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

use crate::error::port_error_response;
use crate::web::state::AppState;
use crate::web::{auth, intake};
use zoo_records_core::access;
use zoo_records_core::domain::{Comment, ObservationRecord, Submission, User};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login_handler,
        auth::logout_handler,
        auth::current_user_handler,
        upload_audio_handler,
        list_my_handler,
        list_all_handler,
        get_submission_handler,
        add_comment_handler,
        download_report_handler,
        update_submission_handler,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            auth::LogoutResponse,
            auth::UserSummary,
            UploadResponse,
            CommentRequest,
            UpdateSubmissionRequest,
        )
    ),
    tags(
        (name = "Zoo Records API", description = "Keeper observation submissions, review, and reports.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The response payload sent after a successful audio ingestion.
#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    #[serde(rename = "submissionId")]
    pub submission_id: u64,
    #[serde(rename = "structuredData")]
    #[schema(value_type = Object)]
    pub structured_data: ObservationRecord,
}

#[derive(Deserialize, ToSchema)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateSubmissionRequest {
    #[serde(rename = "structuredData")]
    #[schema(value_type = Object)]
    pub structured_data: ObservationRecord,
}

/// A submission with its read-time comment join attached. Comments are
/// never stored on the submission; this view is assembled per request.
#[derive(Serialize)]
pub struct SubmissionWithComments {
    #[serde(flatten)]
    pub submission: Submission,
    pub comments: Vec<Comment>,
}

async fn with_comments(
    state: &AppState,
    submission: Submission,
) -> Result<SubmissionWithComments, (StatusCode, String)> {
    let comments = state
        .store
        .comments_for(submission.id)
        .await
        .map_err(port_error_response)?;
    Ok(SubmissionWithComments {
        submission,
        comments,
    })
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// POST /submissions/audio - Upload one observation recording.
///
/// Accepts multipart/form-data with an `audio` file part and a `date` text
/// part. Zookeepers only. Transcription failures never fail the request;
/// the fallback record is substituted and flagged for manual review.
#[utoipa::path(
    post,
    path = "/submissions/audio",
    request_body(content_type = "multipart/form-data", description = "`audio` file part plus `date` text part."),
    responses(
        (status = 200, description = "Audio ingested", body = UploadResponse),
        (status = 400, description = "Missing audio or date part"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not a zookeeper"),
        (status = 500, description = "Audio or report could not be persisted")
    )
)]
pub async fn upload_audio_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    access::require_role(&user, access::UPLOAD_AUDIO).map_err(port_error_response)?;

    let mut audio: Option<(Vec<u8>, String)> = None;
    let mut date: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart data: {e}"),
        )
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("audio") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("audio/wav")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read audio bytes: {e}"),
                    )
                })?;
                audio = Some((bytes.to_vec(), mime_type));
            }
            Some("date") => {
                let text = field.text().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read date field: {e}"),
                    )
                })?;
                date = Some(text);
            }
            _ => {}
        }
    }

    let (audio_bytes, mime_type) = audio.ok_or((
        StatusCode::BAD_REQUEST,
        "Multipart form must include an audio part".to_string(),
    ))?;
    let date = date.ok_or((
        StatusCode::BAD_REQUEST,
        "Multipart form must include a date part".to_string(),
    ))?;

    let submission = intake::ingest(&state, &user, &date, &audio_bytes, &mime_type)
        .await
        .map_err(|e| {
            error!("audio ingestion failed: {e}");
            port_error_response(e)
        })?;

    Ok(Json(UploadResponse {
        submission_id: submission.id,
        structured_data: submission.structured_data,
    }))
}

/// GET /submissions/my - The caller's own submissions (zookeepers).
#[utoipa::path(
    get,
    path = "/submissions/my",
    responses(
        (status = 200, description = "The caller's submissions, in insertion order"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not a zookeeper")
    )
)]
pub async fn list_my_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Submission>>, (StatusCode, String)> {
    access::require_role(&user, access::LIST_OWN).map_err(port_error_response)?;
    let submissions = state
        .store
        .list_by_owner(&user.id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(submissions))
}

/// GET /submissions/all - Every submission (admin and doctor).
#[utoipa::path(
    get,
    path = "/submissions/all",
    responses(
        (status = 200, description = "All submissions, in insertion order"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin or doctor")
    )
)]
pub async fn list_all_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Submission>>, (StatusCode, String)> {
    access::require_role(&user, access::LIST_ALL).map_err(port_error_response)?;
    let submissions = state.store.list_all().await.map_err(port_error_response)?;
    Ok(Json(submissions))
}

/// GET /submissions/{id} - One submission with its comments attached.
#[utoipa::path(
    get,
    path = "/submissions/{id}",
    params(("id" = u64, Path, description = "Submission id")),
    responses(
        (status = 200, description = "The submission and its comments"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such submission")
    )
)]
pub async fn get_submission_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<SubmissionWithComments>, (StatusCode, String)> {
    let submission = state.store.get_by_id(id).await.map_err(port_error_response)?;
    Ok(Json(with_comments(&state, submission).await?))
}

/// POST /submissions/{id}/comments - Append a review comment (admin/doctor).
#[utoipa::path(
    post,
    path = "/submissions/{id}/comments",
    params(("id" = u64, Path, description = "Submission id")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "The created comment"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin or doctor"),
        (status = 404, description = "No such submission")
    )
)]
pub async fn add_comment_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<u64>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<Comment>, (StatusCode, String)> {
    access::require_role(&user, access::ADD_COMMENT).map_err(port_error_response)?;
    let comment = state
        .store
        .add_comment(id, &user.id, &req.content)
        .await
        .map_err(port_error_response)?;
    Ok(Json(comment))
}

/// GET /submissions/{id}/download - The report artifact as a text attachment.
#[utoipa::path(
    get,
    path = "/submissions/{id}/download",
    params(("id" = u64, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Report text", content_type = "text/plain"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Submission or report file absent")
    )
)]
pub async fn download_report_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let submission = state.store.get_by_id(id).await.map_err(port_error_response)?;

    let path = state.config.reports_dir.join(&submission.txt_file_name);
    let body = tokio::fs::read(&path).await.map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            "Report file not found".to_string(),
        )
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", submission.txt_file_name),
            ),
        ],
        body,
    ))
}

/// PUT /submissions/{id} - Replace the structured data and regenerate the
/// report. Zookeepers may edit only their own submissions.
#[utoipa::path(
    put,
    path = "/submissions/{id}",
    params(("id" = u64, Path, description = "Submission id")),
    request_body = UpdateSubmissionRequest,
    responses(
        (status = 200, description = "The updated submission with comments"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Ownership check failed"),
        (status = 404, description = "No such submission"),
        (status = 500, description = "Report could not be rewritten")
    )
)]
pub async fn update_submission_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateSubmissionRequest>,
) -> Result<Json<SubmissionWithComments>, (StatusCode, String)> {
    let updated = intake::apply_update(&state, id, &user, req.structured_data)
        .await
        .map_err(|e| {
            error!("submission update failed: {e}");
            port_error_response(e)
        })?;
    Ok(Json(with_comments(&state, updated).await?))
}
