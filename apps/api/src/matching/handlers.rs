//! Axum route handlers for the stateless matching API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::extract_batch;
use crate::matching::check_preconditions;
use crate::matching::orchestrator::analyze_resumes;
use crate::models::{MatchReport, ResumeDocument};
use crate::routes::upload::read_upload_form;
use crate::state::AppState;

/// POST /api/v1/extract
///
/// Extracts text from every uploaded file without calling the model.
/// Useful for previewing what the model will see.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<Vec<ResumeDocument>>, AppError> {
    let form = read_upload_form(multipart).await?;
    if form.files.is_empty() {
        return Err(AppError::Validation("No files uploaded".to_string()));
    }

    let documents = extract_batch(form.files).await?;
    Ok(Json(documents))
}

/// POST /api/v1/match
///
/// One-shot pipeline: extract → analyze each resume → rank.
/// Inputs are checked before any extraction or model call.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchReport>, AppError> {
    let form = read_upload_form(multipart).await?;
    let job_description = form.job_description.unwrap_or_default();

    check_preconditions(&job_description, form.files.len())?;

    let documents = extract_batch(form.files).await?;
    let results = analyze_resumes(state.model.as_ref(), &job_description, &documents).await?;

    info!(
        "Match batch complete: {} candidate(s), top score {}",
        results.len(),
        results.first().map(|r| r.match_score).unwrap_or_default()
    );

    Ok(Json(MatchReport::from_ranked(results)))
}
