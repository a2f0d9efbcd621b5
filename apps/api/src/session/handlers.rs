use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::MatchReport;
use crate::routes::upload::read_upload_form;
use crate::session::{analyze_session, Notification, SessionSnapshot};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptionUpdate {
    pub job_description: String,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let session = state.session.lock().await;
    Json(session.snapshot(&state.notifier))
}

/// PUT /api/v1/session/job-description
pub async fn handle_set_job_description(
    State(state): State<AppState>,
    Json(req): Json<JobDescriptionUpdate>,
) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.set_job_description(req.job_description);
    Json(session.snapshot(&state.notifier))
}

/// POST /api/v1/session/resumes
///
/// Adds one upload batch. A job description part in the same form, if any,
/// replaces the current one once the batch is accepted. A rejected batch
/// leaves the session untouched.
pub async fn handle_upload_resumes(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SessionSnapshot>, AppError> {
    let form = read_upload_form(multipart).await?;

    let mut session = state.session.lock().await;
    session.add_documents(form.files, &state.notifier).await?;
    if let Some(job_description) = form.job_description {
        session.set_job_description(job_description);
    }
    Ok(Json(session.snapshot(&state.notifier)))
}

/// DELETE /api/v1/session/resumes/:index
pub async fn handle_remove_resume(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.session.lock().await;
    session.remove_document(index)?;
    Ok(Json(session.snapshot(&state.notifier)))
}

/// POST /api/v1/session/analyze
pub async fn handle_analyze(State(state): State<AppState>) -> Result<Json<MatchReport>, AppError> {
    let results = analyze_session(&state.session, state.model.as_ref(), &state.notifier).await?;
    Ok(Json(MatchReport::from_ranked(results)))
}

/// POST /api/v1/session/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.reset(&state.notifier);
    Json(session.snapshot(&state.notifier))
}

/// GET /api/v1/session/notifications
pub async fn handle_list_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifier.active())
}

/// DELETE /api/v1/session/notifications/:id
pub async fn handle_dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.notifier.dismiss(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Notification {id} not found")))
    }
}
