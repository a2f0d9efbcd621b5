use serde::{Deserialize, Serialize};

/// Sub-scores composing a finer-grained view of fit. Each is 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub skills: u8,
    pub experience: u8,
    pub education: u8,
    pub overall: u8,
}

/// The validated model reply for one resume, before it is tied to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalysis {
    pub match_score: u8,
    pub category_scores: CategoryScores,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub feedback: String,
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
}

/// One ranked entry of a match report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Candidate identifier, taken from the source document name.
    pub name: String,
    pub match_score: u8,
    pub category_scores: CategoryScores,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub feedback: String,
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
}

impl MatchResult {
    pub fn from_analysis(name: impl Into<String>, analysis: MatchAnalysis) -> Self {
        Self {
            name: name.into(),
            match_score: analysis.match_score,
            category_scores: analysis.category_scores,
            matching_skills: analysis.matching_skills,
            missing_skills: analysis.missing_skills,
            feedback: analysis.feedback,
            strength_areas: analysis.strength_areas,
            improvement_areas: analysis.improvement_areas,
        }
    }

    pub fn fit_band(&self) -> FitBand {
        FitBand::from_score(self.match_score)
    }
}

/// Coarse fit classification shown next to each score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitBand {
    Strong,
    Moderate,
    Weak,
}

impl FitBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            FitBand::Strong
        } else if score >= 60 {
            FitBand::Moderate
        } else {
            FitBand::Weak
        }
    }
}

/// A ranked result together with its band.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub rank: usize,
    pub fit_band: FitBand,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Response body for a completed analysis batch. `candidates` is sorted by
/// score, highest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub top_candidate: Option<String>,
    pub candidates: Vec<RankedCandidate>,
}

impl MatchReport {
    /// Builds a report from results that are already ranked.
    pub fn from_ranked(results: Vec<MatchResult>) -> Self {
        let top_candidate = results.first().map(|r| r.name.clone());
        let candidates = results
            .into_iter()
            .enumerate()
            .map(|(i, result)| RankedCandidate {
                rank: i + 1,
                fit_band: result.fit_band(),
                result,
            })
            .collect();
        Self {
            top_candidate,
            candidates,
        }
    }
}
