//! Response Validator: turns the model's free-form reply into a strict `MatchAnalysis`.
//!
//! The model output is untrusted. The reply may wrap the JSON in prose, omit
//! fields, or use the wrong types. Only a reply with no parsable JSON object is
//! an error; everything else is normalized with defaults.

use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::matching::prompts::NO_FEEDBACK_PLACEHOLDER;
use crate::models::{CategoryScores, MatchAnalysis};

/// The reply contained no extractable or parsable JSON object.
/// `raw` keeps the full model reply for diagnosis; it is never shown to users.
#[derive(Debug, Clone, Error)]
#[error("Invalid response format from model: {reason}")]
pub struct ResponseFormatError {
    pub reason: String,
    pub raw: String,
}

/// Parses and normalizes one raw model reply.
pub fn parse_match_response(raw: &str) -> Result<MatchAnalysis, ResponseFormatError> {
    let payload = extract_json_payload(raw).map_err(|reason| {
        error!("Could not find JSON in model reply: {reason}. Raw reply: {raw}");
        ResponseFormatError {
            reason,
            raw: raw.to_string(),
        }
    })?;

    let value: Value = serde_json::from_str(payload).map_err(|e| {
        error!("Failed to parse model reply as JSON: {e}. Raw reply: {raw}");
        ResponseFormatError {
            reason: format!("JSON parse error: {e}"),
            raw: raw.to_string(),
        }
    })?;

    Ok(normalize(&value))
}

/// Returns the substring from the first `{` to the last `}`, inclusive.
fn extract_json_payload(raw: &str) -> Result<&str, String> {
    let start = raw
        .find('{')
        .ok_or_else(|| "no opening brace in reply".to_string())?;
    let end = raw
        .rfind('}')
        .ok_or_else(|| "no closing brace in reply".to_string())?;
    if end < start {
        return Err("closing brace precedes opening brace".to_string());
    }
    Ok(&raw[start..=end])
}

fn normalize(value: &Value) -> MatchAnalysis {
    let categories = value.get("categoryScores");
    let category = |key: &str| coerce_score(categories.and_then(|c| c.get(key)));

    MatchAnalysis {
        match_score: coerce_score(value.get("matchScore")),
        category_scores: CategoryScores {
            skills: category("skills"),
            experience: category("experience"),
            education: category("education"),
            overall: category("overall"),
        },
        matching_skills: string_list(value.get("matchingSkills")),
        missing_skills: string_list(value.get("missingSkills")),
        feedback: feedback(value.get("feedback")),
        strength_areas: string_list(value.get("strengthAreas")),
        improvement_areas: string_list(value.get("improvementAreas")),
    }
}

/// Numeric coercion into 0–100. Missing, non-numeric, non-finite and
/// out-of-range values all become 0.
fn coerce_score(value: Option<&Value>) -> u8 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    match number.map(f64::round) {
        Some(n) if n.is_finite() && (0.0..=100.0).contains(&n) => n as u8,
        _ => 0,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn feedback(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => NO_FEEDBACK_PLACEHOLDER.to_string(),
    }
}
