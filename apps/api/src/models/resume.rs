use serde::{Deserialize, Serialize};

/// One uploaded candidate document after text extraction.
///
/// `name` is the original file name and doubles as the candidate identifier
/// in match results. Documents are never edited after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: String,
    pub content: String,
}

impl ResumeDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Lightweight view of a held document, used in session snapshots.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub index: usize,
    pub name: String,
    pub char_count: usize,
}

impl ResumeSummary {
    pub fn from_document(index: usize, doc: &ResumeDocument) -> Self {
        Self {
            index,
            name: doc.name.clone(),
            char_count: doc.content.chars().count(),
        }
    }
}
