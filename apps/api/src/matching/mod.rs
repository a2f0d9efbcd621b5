// Resume Matching Engine
// Implements: prompt building, response validation, fan-out orchestration, ranking.
// All model calls go through llm_client; nothing here talks HTTP to the model directly.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod validator;

#[cfg(test)]
pub mod test_support;

use thiserror::Error;

use crate::llm_client::LlmError;
use validator::ResponseFormatError;

/// Upper bound on resumes in one analysis batch.
pub const MAX_RESUMES: usize = 5;

pub const MISSING_INPUTS_MESSAGE: &str =
    "Please provide both a job description and at least one resume";
pub const TOO_MANY_RESUMES_MESSAGE: &str =
    "Maximum 5 resumes allowed. Please remove some resumes before adding more.";

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{0}")]
    Precondition(String),

    #[error("Model call failed for '{resume}': {source}")]
    Model {
        resume: String,
        #[source]
        source: LlmError,
    },

    #[error("Unusable model reply for '{resume}': {source}")]
    ResponseFormat {
        resume: String,
        #[source]
        source: ResponseFormatError,
    },
}

/// Rejects a batch before any network activity: the job description must be
/// non-blank and there must be 1..=MAX_RESUMES resumes.
pub fn check_preconditions(job_description: &str, resume_count: usize) -> Result<(), MatchError> {
    if job_description.trim().is_empty() || resume_count == 0 {
        return Err(MatchError::Precondition(MISSING_INPUTS_MESSAGE.to_string()));
    }
    if resume_count > MAX_RESUMES {
        return Err(MatchError::Precondition(TOO_MANY_RESUMES_MESSAGE.to_string()));
    }
    Ok(())
}
