// Prompt constants for the batch analysis and explanation calls.

use crate::models::report::{JdSkills, ResumeAnalysis};

/// Fixed system instruction for the batch analysis call.
pub const HR_ANALYST_SYSTEM: &str =
    "You are an expert HR analyst specializing in tech recruitment. \
    Your task is to analyze resumes against a job description. \
    First, identify the key hard and soft skills from the job description. \
    Then, for each resume, calculate a relevance score by comparing the resume's content against the extracted skills. \
    Provide a detailed, structured analysis in the specified JSON format. \
    Ensure every field in the schema is populated accurately. \
    The file names must match the ones provided.";

/// Text part placed before the job-description content block.
pub const JD_PREAMBLE: &str = "Here is the job description:";

/// Text part placed before the resume content blocks.
pub const RESUMES_PREAMBLE: &str = "Here are the resumes to analyze against the job description:";

/// Free-text prompt for a single candidate's fit explanation.
/// Asks for 2-3 sentences opening with an overall-fit statement.
pub fn explanation_prompt(analysis: &ResumeAnalysis, skills: &JdSkills) -> String {
    format!(
        "Based on the following analysis, provide a brief, natural language explanation \
         of this candidate's suitability.\n\
         \n\
         Job Skills Required:\n\
         - Hard Skills: {hard}\n\
         - Soft Skills: {soft}\n\
         \n\
         Candidate's Resume Analysis:\n\
         - File: {file}\n\
         - Overall Score: {score}/100\n\
         - Verdict: {verdict}\n\
         - Matched Skills: {matched}\n\
         - Missing Skills: {missing}\n\
         \n\
         Start by stating the overall fit (e.g., \"This resume is a strong match...\") \
         and then elaborate on strengths and weaknesses regarding the key skills required \
         for the job. Keep it to 2-3 sentences.",
        hard = skills.hard_skills.join(", "),
        soft = skills.soft_skills.join(", "),
        file = analysis.file_name,
        score = analysis.final_score,
        verdict = analysis.verdict,
        matched = analysis.matched_skills.join(", "),
        missing = analysis.missing_skills.join(", "),
    )
}
