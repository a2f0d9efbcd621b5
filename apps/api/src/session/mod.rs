//! Interactive Session: the single analysis session served by this process.
//!
//! All state changes go through the action methods on `Session`; each action
//! reports its outcome to the user through the `Notifier` it is handed.
//! The session lock is never held across model calls: `analyze_session`
//! snapshots inputs, releases the lock, runs the batch, then re-locks to store.

pub mod handlers;
pub mod notifications;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::{ANALYSIS_FAILED_MESSAGE, EXTRACTION_FAILED_MESSAGE};
use crate::extraction::{extract_batch, ExtractionError, UploadedFile};
use crate::llm_client::CompletionModel;
use crate::matching::orchestrator::analyze_resumes;
use crate::matching::{MatchError, MAX_RESUMES, MISSING_INPUTS_MESSAGE, TOO_MANY_RESUMES_MESSAGE};
use crate::models::{MatchReport, MatchResult, ResumeDocument, ResumeSummary};
pub use notifications::{Notification, NotificationKind, Notifier};

const ANALYSIS_DONE_MESSAGE: &str = "Analysis completed successfully!";
const RESET_MESSAGE: &str = "Ready for a new analysis!";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Maximum 5 resumes allowed ({held} held, {incoming} uploaded)")]
    TooManyResumes { held: usize, incoming: usize },

    #[error("{}", MISSING_INPUTS_MESSAGE)]
    MissingInputs,

    #[error("An analysis is already running")]
    AnalysisInProgress,

    #[error("The session was reset while the analysis was running")]
    Superseded,

    #[error("No resume at position {0}")]
    NoSuchDocument(usize),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Analysis(#[from] MatchError),
}

/// Inputs captured when an analysis starts.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    generation: u64,
    pub job_description: String,
    pub documents: Vec<ResumeDocument>,
}

#[derive(Debug, Default)]
pub struct Session {
    job_description: String,
    documents: Vec<ResumeDocument>,
    results: Vec<MatchResult>,
    is_analyzing: bool,
    /// Bumped on reset so a batch started before the reset cannot store results.
    generation: u64,
}

/// Read-only view of the session returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub job_description: String,
    pub documents: Vec<ResumeSummary>,
    pub is_analyzing: bool,
    pub report: Option<MatchReport>,
    pub notifications: Vec<Notification>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[ResumeDocument] {
        &self.documents
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn is_analyzing(&self) -> bool {
        self.is_analyzing
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    /// Extracts and appends one upload batch.
    ///
    /// The batch is rejected before extraction if it would push the session
    /// past `MAX_RESUMES`. An extraction failure anywhere in the batch adds
    /// nothing. Either failure emits exactly one error notification.
    pub async fn add_documents(
        &mut self,
        uploads: Vec<UploadedFile>,
        notifier: &Notifier,
    ) -> Result<usize, SessionError> {
        if uploads.is_empty() {
            return Ok(0);
        }

        if self.documents.len() + uploads.len() > MAX_RESUMES {
            notifier.error(TOO_MANY_RESUMES_MESSAGE);
            return Err(SessionError::TooManyResumes {
                held: self.documents.len(),
                incoming: uploads.len(),
            });
        }

        match extract_batch(uploads).await {
            Ok(new_documents) => {
                let added = new_documents.len();
                self.documents.extend(new_documents);
                info!("Session now holds {} resume(s)", self.documents.len());
                Ok(added)
            }
            Err(e) => {
                notifier.error(EXTRACTION_FAILED_MESSAGE);
                Err(e.into())
            }
        }
    }

    pub fn remove_document(&mut self, index: usize) -> Result<ResumeDocument, SessionError> {
        if index >= self.documents.len() {
            return Err(SessionError::NoSuchDocument(index));
        }
        Ok(self.documents.remove(index))
    }

    /// Checks preconditions and marks the session busy.
    pub fn begin_analysis(&mut self, notifier: &Notifier) -> Result<AnalysisTicket, SessionError> {
        if self.is_analyzing {
            return Err(SessionError::AnalysisInProgress);
        }
        if self.job_description.trim().is_empty() || self.documents.is_empty() {
            notifier.error(MISSING_INPUTS_MESSAGE);
            return Err(SessionError::MissingInputs);
        }

        self.is_analyzing = true;
        Ok(AnalysisTicket {
            generation: self.generation,
            job_description: self.job_description.clone(),
            documents: self.documents.clone(),
        })
    }

    /// Stores the outcome of a batch started with `begin_analysis`.
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<Vec<MatchResult>, MatchError>,
        notifier: &Notifier,
    ) -> Result<Vec<MatchResult>, SessionError> {
        if ticket.generation != self.generation {
            info!("Discarding results of an analysis that outlived a reset");
            return Err(SessionError::Superseded);
        }
        self.is_analyzing = false;

        match outcome {
            Ok(results) => {
                self.results = results.clone();
                notifier.success(ANALYSIS_DONE_MESSAGE);
                Ok(results)
            }
            Err(e) => {
                notifier.error(ANALYSIS_FAILED_MESSAGE);
                Err(e.into())
            }
        }
    }

    /// Clears every input and result.
    pub fn reset(&mut self, notifier: &Notifier) {
        *self = Session {
            generation: self.generation + 1,
            ..Session::default()
        };
        notifier.success(RESET_MESSAGE);
    }

    pub fn snapshot(&self, notifier: &Notifier) -> SessionSnapshot {
        SessionSnapshot {
            job_description: self.job_description.clone(),
            documents: self
                .documents
                .iter()
                .enumerate()
                .map(|(i, d)| ResumeSummary::from_document(i, d))
                .collect(),
            is_analyzing: self.is_analyzing,
            report: (!self.results.is_empty())
                .then(|| MatchReport::from_ranked(self.results.clone())),
            notifications: notifier.active(),
        }
    }
}

/// Runs one analysis batch over the session's current inputs.
pub async fn analyze_session(
    session: &Mutex<Session>,
    model: &dyn CompletionModel,
    notifier: &Notifier,
) -> Result<Vec<MatchResult>, SessionError> {
    let ticket = session.lock().await.begin_analysis(notifier)?;

    let outcome = analyze_resumes(model, &ticket.job_description, &ticket.documents).await;

    session.lock().await.finish_analysis(ticket, outcome, notifier)
}
