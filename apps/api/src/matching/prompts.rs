// Matching LLM prompt templates.
// The model does not reliably honor a schema unless every key is spelled out,
// so the expected JSON shape is repeated verbatim in the prompt.

/// Placeholder used when the model omits feedback or returns it empty.
pub const NO_FEEDBACK_PLACEHOLDER: &str = "No feedback provided";

/// Builds the analysis instruction for one (job description, resume) pair.
/// Both inputs are embedded verbatim.
pub fn build_match_prompt(job_description: &str, resume_content: &str) -> String {
    format!(
        r#"Analyze this resume against the job description thoroughly and objectively.

Provide a detailed evaluation including:
1. Overall match score from 0-100
2. Categorized scores for: skills match (0-100), experience relevance (0-100), education fit (0-100), overall fit (0-100)
3. List of matching skills found in both the resume and job description (be specific)
4. List of required skills mentioned in the job description but missing from the resume
5. Detailed feedback about the candidate's fit for the position
6. 2-3 key strength areas of the candidate relevant to this role
7. 2-3 improvement areas for better job fit

Job Description:
{job_description}

Resume:
{resume_content}

Return ONLY a valid JSON object with these exact keys and types, and nothing else:
{{
  "matchScore": number,
  "categoryScores": {{
    "skills": number,
    "experience": number,
    "education": number,
    "overall": number
  }},
  "matchingSkills": string[],
  "missingSkills": string[],
  "feedback": string,
  "strengthAreas": string[],
  "improvementAreas": string[]
}}"#
    )
}
