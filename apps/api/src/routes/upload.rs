//! Multipart form reading shared by the upload endpoints.

use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::UploadedFile;

const JOB_DESCRIPTION_FIELDS: [&str; 2] = ["job_description", "jobDescription"];

/// The parts of an upload form this service understands.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub job_description: Option<String>,
    pub files: Vec<UploadedFile>,
}

/// Collects every file part plus an optional job description text part.
/// Unknown text parts are ignored.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let media_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read '{file_name}': {e}")))?;
            debug!("Received file '{file_name}' ({} bytes)", bytes.len());
            form.files.push(UploadedFile {
                file_name,
                media_type,
                bytes,
            });
        } else if JOB_DESCRIPTION_FIELDS.contains(&field_name.as_str()) {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read job description: {e}")))?;
            form.job_description = Some(text);
        } else {
            debug!("Ignoring multipart field '{field_name}'");
        }
    }

    Ok(form)
}
