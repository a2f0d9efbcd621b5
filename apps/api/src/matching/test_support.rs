//! Scripted `CompletionModel` for pipeline and handler tests.
//!
//! Resumes are identified by a `CANDIDATE-<n>` marker in their content, which
//! the prompt embeds verbatim; reply `n` is returned for that resume.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::{CompletionModel, LlmError};

pub fn reply_with_score(score: u8) -> String {
    format!(
        "Here is my evaluation:\n{{\"matchScore\": {score}, \"categoryScores\": {{\"skills\": {score}, \"experience\": {score}, \"education\": {score}, \"overall\": {score}}}, \"matchingSkills\": [\"Rust\"], \"missingSkills\": [], \"feedback\": \"scripted\", \"strengthAreas\": [], \"improvementAreas\": []}}"
    )
}

pub struct ScriptedModel {
    replies: Vec<String>,
    delays: Vec<Duration>,
    failure: Option<(usize, fn() -> LlmError)>,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl ScriptedModel {
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies,
            delays: Vec::new(),
            failure: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_scores(scores: &[u8]) -> Self {
        Self::with_replies(scores.iter().copied().map(reply_with_score).collect())
    }

    pub fn with_delays(mut self, delays: &[Duration]) -> Self {
        self.delays = delays.to_vec();
        self
    }

    pub fn failing_on(mut self, index: usize, error: fn() -> LlmError) -> Self {
        self.failure = Some((index, error));
        self
    }

    fn candidate_index(prompt: &str) -> usize {
        prompt
            .find("CANDIDATE-")
            .map(|at| &prompt[at + "CANDIDATE-".len()..])
            .and_then(|rest| {
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().ok()
            })
            .unwrap_or(0)
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let index = Self::candidate_index(prompt);
        match self.delays.get(index) {
            Some(delay) => tokio::time::sleep(*delay).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some((failing, error)) = self.failure {
            if failing == index {
                return Err(error());
            }
        }
        self.replies
            .get(index)
            .cloned()
            .ok_or(LlmError::EmptyContent)
    }
}
