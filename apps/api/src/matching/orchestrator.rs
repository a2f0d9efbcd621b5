//! Matching Orchestrator: one model call per resume, all in flight at once.
//!
//! Flow per resume: build_match_prompt → model.generate → parse_match_response.
//! The batch is all-or-nothing: the first failure drops the remaining calls
//! and no partial results are returned.

use futures::future::try_join_all;
use tracing::{info, warn};

use crate::llm_client::CompletionModel;
use crate::matching::prompts::build_match_prompt;
use crate::matching::validator::parse_match_response;
use crate::matching::{check_preconditions, MatchError};
use crate::models::{MatchResult, ResumeDocument};

/// Analyzes every resume against the job description and ranks the results.
///
/// Results are joined in input order and then stably sorted by `match_score`
/// descending, so equal scores keep their upload order.
pub async fn analyze_resumes(
    model: &dyn CompletionModel,
    job_description: &str,
    resumes: &[ResumeDocument],
) -> Result<Vec<MatchResult>, MatchError> {
    check_preconditions(job_description, resumes.len())?;

    info!("Analyzing {} resume(s)", resumes.len());

    let mut results = try_join_all(
        resumes
            .iter()
            .map(|resume| analyze_resume(model, job_description, resume)),
    )
    .await
    .inspect_err(|e| warn!("Analysis batch failed: {e}"))?;

    rank_results(&mut results);
    Ok(results)
}

async fn analyze_resume(
    model: &dyn CompletionModel,
    job_description: &str,
    resume: &ResumeDocument,
) -> Result<MatchResult, MatchError> {
    let prompt = build_match_prompt(job_description, &resume.content);

    let raw = model
        .generate(&prompt)
        .await
        .map_err(|source| MatchError::Model {
            resume: resume.name.clone(),
            source,
        })?;

    let analysis = parse_match_response(&raw).map_err(|source| MatchError::ResponseFormat {
        resume: resume.name.clone(),
        source,
    })?;

    info!("Scored '{}': {}/100", resume.name, analysis.match_score);
    Ok(MatchResult::from_analysis(resume.name.clone(), analysis))
}

/// Stable sort, highest score first.
pub fn rank_results(results: &mut [MatchResult]) {
    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::matching::test_support::{reply_with_score, ScriptedModel};

    fn resumes(n: usize) -> Vec<ResumeDocument> {
        (0..n)
            .map(|i| ResumeDocument::new(format!("candidate-{i}.pdf"), format!("CANDIDATE-{i}")))
            .collect()
    }

    fn names(results: &[MatchResult]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_results_sorted_descending_with_stable_ties() {
        let model = ScriptedModel::with_scores(&[55, 90, 90, 10, 72]);
        let results = analyze_resumes(&model, "Rust engineer", &resumes(5))
            .await
            .unwrap();

        let scores: Vec<u8> = results.iter().map(|r| r.match_score).collect();
        assert_eq!(scores, vec![90, 90, 72, 55, 10]);
        assert_eq!(
            names(&results),
            vec![
                "candidate-1.pdf",
                "candidate-2.pdf",
                "candidate-4.pdf",
                "candidate-0.pdf",
                "candidate-3.pdf"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_tie_break_uses_input_order_not_completion_order() {
        // candidate-1 finishes last but was uploaded before candidate-2.
        let model = ScriptedModel::with_scores(&[55, 90, 90, 10, 72]).with_delays(&[
            Duration::from_millis(10),
            Duration::from_millis(500),
            Duration::from_millis(5),
            Duration::from_millis(50),
            Duration::from_millis(1),
        ]);
        let results = analyze_resumes(&model, "Rust engineer", &resumes(5))
            .await
            .unwrap();
        assert_eq!(names(&results)[..2], ["candidate-1.pdf", "candidate-2.pdf"]);
    }

    #[tokio::test]
    async fn test_one_resume_per_result_with_names_from_documents() {
        let model = ScriptedModel::with_scores(&[40, 60]);
        let results = analyze_resumes(&model, "jd", &resumes(2)).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
        assert!(results.iter().all(|r| r.feedback == "scripted"));
    }

    #[tokio::test]
    async fn test_calls_run_concurrently() {
        let model = ScriptedModel::with_scores(&[1, 2, 3]);
        analyze_resumes(&model, "jd", &resumes(3)).await.unwrap();
        assert_eq!(model.max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_model_failure_fails_whole_batch() {
        let model = ScriptedModel::with_scores(&[80, 70, 60]).failing_on(1, || LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        });
        let err = analyze_resumes(&model, "jd", &resumes(3)).await.unwrap_err();
        match err {
            MatchError::Model { resume, .. } => assert_eq!(resume, "candidate-1.pdf"),
            other => panic!("expected model error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparsable_reply_fails_whole_batch() {
        let model = ScriptedModel::with_replies(vec![
            reply_with_score(80),
            "Sorry, I can't help with that.".to_string(),
        ]);
        let err = analyze_resumes(&model, "jd", &resumes(2)).await.unwrap_err();
        match err {
            MatchError::ResponseFormat { resume, source } => {
                assert_eq!(resume, "candidate-1.pdf");
                assert_eq!(source.raw, "Sorry, I can't help with that.");
            }
            other => panic!("expected response format error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_inputs_make_no_calls() {
        let model = ScriptedModel::with_scores(&[50]);
        assert!(matches!(
            analyze_resumes(&model, "   ", &resumes(1)).await,
            Err(MatchError::Precondition(_))
        ));
        assert!(matches!(
            analyze_resumes(&model, "jd", &[]).await,
            Err(MatchError::Precondition(_))
        ));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_more_than_five_resumes_make_no_calls() {
        let model = ScriptedModel::with_scores(&[1, 2, 3, 4, 5, 6]);
        assert!(matches!(
            analyze_resumes(&model, "jd", &resumes(6)).await,
            Err(MatchError::Precondition(_))
        ));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rank_results_is_stable() {
        let mk = |name: &str, score: u8| {
            MatchResult::from_analysis(
                name,
                parse_match_response(&reply_with_score(score)).unwrap(),
            )
        };
        let mut results = vec![mk("a", 50), mk("b", 70), mk("c", 50), mk("d", 70)];
        rank_results(&mut results);
        assert_eq!(names(&results), vec!["b", "d", "a", "c"]);
    }
}
