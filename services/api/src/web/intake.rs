//! services/api/src/web/intake.rs
//!
//! The audio intake and update pipelines. Intake is best-effort on the
//! model but all-or-nothing on storage: a transcription failure is absorbed
//! into the fallback record, while a file-write failure aborts the request
//! before any store record exists. A submission therefore never references
//! a report file that is not on disk.

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::web::state::AppState;
use zoo_records_core::access;
use zoo_records_core::domain::{ObservationRecord, Submission, User};
use zoo_records_core::ports::{PortError, PortResult};
use zoo_records_core::report::render_report;

/// Derives the audio file extension from the MIME subtype, as the upload
/// clients send `audio/wav`, `audio/webm`, and friends.
fn extension_from_mime(mime_type: &str) -> &str {
    mime_type.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or("wav")
}

/// Ingests one uploaded observation: persist the audio, transcribe it (or
/// fall back), render and persist the report, then append the store record.
pub async fn ingest(
    state: &AppState,
    keeper: &User,
    date: &str,
    audio: &[u8],
    mime_type: &str,
) -> PortResult<Submission> {
    // Collision-free stem shared by the audio file and the report file. The
    // uuid replaces the millisecond timestamp the naive scheme would use.
    let stem = format!("{}_{}_{}", keeper.user_id, date, Uuid::new_v4().simple());
    let audio_file_name = format!("{stem}.{}", extension_from_mime(mime_type));

    let audio_path = state.config.uploads_dir.join(&audio_file_name);
    tokio::fs::write(&audio_path, audio)
        .await
        .map_err(|e| PortError::Storage(format!("writing {}: {e}", audio_path.display())))?;

    // Audio processing is best-effort; submission creation is guaranteed.
    let structured_data = match state
        .transcriber
        .transcribe(audio, date, &state.config.transcribe_language, mime_type)
        .await
    {
        Ok(record) => record,
        Err(e) => {
            warn!(keeper = %keeper.user_id, %date, "transcription failed, using fallback record: {e}");
            ObservationRecord::manual_review_fallback(date, &keeper.name)
        }
    };

    let txt_file_name = format!("{stem}.txt");
    let report = render_report(&structured_data, &keeper.name, date, Utc::now());
    let report_path = state.config.reports_dir.join(&txt_file_name);
    tokio::fs::write(&report_path, report)
        .await
        .map_err(|e| PortError::Storage(format!("writing {}: {e}", report_path.display())))?;

    state
        .store
        .create(&keeper.id, date, &audio_file_name, structured_data, &txt_file_name)
        .await
}

/// Applies an authorized edit: ownership check, overwrite the structured
/// data, and regenerate the report under the existing file name. Runs under
/// the update gate so concurrent edits to the same submission cannot lose
/// the record/artifact pairing.
pub async fn apply_update(
    state: &AppState,
    id: u64,
    caller: &User,
    data: ObservationRecord,
) -> PortResult<Submission> {
    let _gate = state.update_gate.lock().await;

    let submission = state.store.get_by_id(id).await?;
    access::authorize_update(caller, &submission)?;

    let updated = state.store.update_structured_data(id, data).await?;

    let owner_name = state
        .users
        .find_by_id(&updated.user_id)
        .map(|owner| owner.name)
        .ok_or_else(|| PortError::Unexpected(format!("owner {} not found", updated.user_id)))?;

    let report = render_report(&updated.structured_data, &owner_name, &updated.date, Utc::now());
    let report_path = state.config.reports_dir.join(&updated.txt_file_name);
    // A failed rewrite must surface: the edit already hit the store, and the
    // caller has to know the artifact no longer matches.
    tokio::fs::write(&report_path, report)
        .await
        .map_err(|e| PortError::Storage(format!("writing {}: {e}", report_path.display())))?;

    Ok(updated)
}
