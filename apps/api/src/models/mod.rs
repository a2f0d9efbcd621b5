pub mod match_result;
pub mod resume;

pub use match_result::{CategoryScores, MatchAnalysis, MatchReport, MatchResult};
pub use resume::{ResumeDocument, ResumeSummary};
