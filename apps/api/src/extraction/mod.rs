//! Document Text Extraction: turns uploaded resume files into plain text.
//!
//! Supported: PDF (via pdf-extract), DOCX (zip + word/document.xml), and
//! anything else decoded as UTF-8 text. PDF parsing is CPU-bound and runs
//! inside `tokio::task::spawn_blocking`.

pub mod docx;
pub mod pdf;

use bytes::Bytes;
use futures::future::try_join_all;
use thiserror::Error;
use tracing::debug;

use crate::models::ResumeDocument;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const GENERIC_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to read PDF '{file}': {message}")]
    Pdf { file: String, message: String },

    #[error("Failed to read DOCX '{file}': {message}")]
    Docx { file: String, message: String },

    #[error("Extraction task for '{file}' did not complete: {message}")]
    Task { file: String, message: String },
}

/// How a file's bytes are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Decides the kind from the declared media type, falling back to the file
    /// extension when the media type is missing or generic.
    pub fn detect(file_name: &str, media_type: Option<&str>) -> Self {
        let media_type = media_type
            .map(|m| {
                m.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase()
            })
            .filter(|m| !m.is_empty() && m != GENERIC_MEDIA_TYPE);

        match media_type.as_deref() {
            Some(PDF_MEDIA_TYPE) => DocumentKind::Pdf,
            Some(DOCX_MEDIA_TYPE) => DocumentKind::Docx,
            Some(_) => DocumentKind::PlainText,
            None => Self::from_extension(file_name),
        }
    }

    fn from_extension(file_name: &str) -> Self {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Docx,
            _ => DocumentKind::PlainText,
        }
    }
}

/// A file as received from an upload, before extraction.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub media_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::detect(&self.file_name, self.media_type.as_deref())
    }
}

/// Extracts the text of one uploaded file.
pub async fn extract_document(file: UploadedFile) -> Result<ResumeDocument, ExtractionError> {
    let kind = file.kind();
    debug!(
        "Extracting '{}' as {:?} ({} bytes)",
        file.file_name,
        kind,
        file.bytes.len()
    );

    let content = match kind {
        DocumentKind::Pdf => {
            let bytes = file.bytes.clone();
            let name = file.file_name.clone();
            tokio::task::spawn_blocking(move || pdf::extract_pdf_text(&name, &bytes))
                .await
                .map_err(|e| ExtractionError::Task {
                    file: file.file_name.clone(),
                    message: e.to_string(),
                })??
        }
        DocumentKind::Docx => docx::extract_docx_text(&file.file_name, &file.bytes)?,
        DocumentKind::PlainText => String::from_utf8_lossy(&file.bytes).into_owned(),
    };

    Ok(ResumeDocument::new(file.file_name, content))
}

/// Extracts every file of one upload action concurrently.
///
/// All-or-nothing: the first failure fails the batch and no documents are
/// returned. Output order matches input order.
pub async fn extract_batch(
    files: Vec<UploadedFile>,
) -> Result<Vec<ResumeDocument>, ExtractionError> {
    try_join_all(files.into_iter().map(extract_document)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, media_type: Option<&str>, bytes: &'static [u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            media_type: media_type.map(String::from),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[test]
    fn test_detect_prefers_media_type() {
        assert_eq!(
            DocumentKind::detect("resume.txt", Some("application/pdf")),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::detect("resume.pdf", Some("text/plain")),
            DocumentKind::PlainText
        );
        assert_eq!(
            DocumentKind::detect("resume", Some(DOCX_MEDIA_TYPE)),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_ignores_media_type_parameters_and_case() {
        assert_eq!(
            DocumentKind::detect("x", Some("Application/PDF; charset=binary")),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(DocumentKind::detect("Resume.PDF", None), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::detect("cv.docx", Some("application/octet-stream")),
            DocumentKind::Docx
        );
        assert_eq!(DocumentKind::detect("cv.txt", Some("")), DocumentKind::PlainText);
        assert_eq!(DocumentKind::detect("no_extension", None), DocumentKind::PlainText);
    }

    #[tokio::test]
    async fn test_plain_text_is_decoded_verbatim() {
        let doc = extract_document(upload("jane.txt", Some("text/plain"), b"Jane Doe\nRust, Go"))
            .await
            .unwrap();
        assert_eq!(doc.name, "jane.txt");
        assert_eq!(doc.content, "Jane Doe\nRust, Go");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced_not_rejected() {
        let doc = extract_document(upload("odd.txt", None, b"caf\xff"))
            .await
            .unwrap();
        assert_eq!(doc.content, "caf\u{FFFD}");
    }

    #[tokio::test]
    async fn test_corrupt_pdf_fails_extraction() {
        let err = extract_document(upload("broken.pdf", Some(PDF_MEDIA_TYPE), b"not a pdf"))
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("broken.pdf"), "got: {message}");
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let docs = extract_batch(vec![
            upload("b.txt", None, b"second"),
            upload("a.txt", None, b"first"),
        ])
        .await
        .unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["b.txt", "a.txt"]);
    }

    #[tokio::test]
    async fn test_batch_fails_as_a_whole() {
        let result = extract_batch(vec![
            upload("good.txt", None, b"fine"),
            upload("bad.pdf", Some(PDF_MEDIA_TYPE), b"%PDF-garbage"),
        ])
        .await;
        assert!(result.is_err());
    }
}
