//! Response validation — the remote service is instructed to conform to the
//! schema, but the gateway verifies it on receipt. Serde already rejects
//! missing fields, negative scores, and unknown verdict labels; the checks
//! here cover what the type system cannot express.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::report::AnalysisResult;

#[derive(Debug, Error, PartialEq)]
pub enum ResponseViolation {
    #[error("expected {expected} resume analyses, got {got}")]
    CardinalityMismatch { expected: usize, got: usize },

    #[error("analysis references a file that was not submitted: {0}")]
    UnknownFileName(String),

    #[error("no analysis returned for submitted file: {0}")]
    MissingFileName(String),

    #[error("{file}: {field} must be 0-100, got {value}")]
    ScoreOutOfRange {
        file: String,
        field: &'static str,
        value: u32,
    },

    #[error("{file}: skill listed as both matched and missing: {skill}")]
    SkillOverlap { file: String, skill: String },
}

/// Checks a parsed result against the submitted resume file names.
/// Any violation is treated as a response-format failure of the whole batch.
pub fn validate_result(
    result: &AnalysisResult,
    submitted_names: &[String],
) -> Result<(), ResponseViolation> {
    let analyses = &result.resume_analyses;

    if analyses.len() != submitted_names.len() {
        return Err(ResponseViolation::CardinalityMismatch {
            expected: submitted_names.len(),
            got: analyses.len(),
        });
    }

    let submitted: HashSet<&str> = submitted_names.iter().map(String::as_str).collect();
    let returned: HashSet<&str> = analyses.iter().map(|a| a.file_name.as_str()).collect();

    if let Some(analysis) = analyses.iter().find(|a| !submitted.contains(a.file_name.as_str())) {
        return Err(ResponseViolation::UnknownFileName(analysis.file_name.clone()));
    }
    if let Some(name) = submitted_names.iter().find(|n| !returned.contains(n.as_str())) {
        return Err(ResponseViolation::MissingFileName(name.clone()));
    }

    for analysis in analyses {
        let scores = [
            ("finalScore", analysis.final_score),
            ("hardSkillScore", analysis.hard_skill_score),
            ("softSkillScore", analysis.soft_skill_score),
        ];
        for (field, value) in scores {
            if value > 100 {
                return Err(ResponseViolation::ScoreOutOfRange {
                    file: analysis.file_name.clone(),
                    field,
                    value,
                });
            }
        }

        let matched: HashSet<&str> = analysis.matched_skills.iter().map(String::as_str).collect();
        if let Some(skill) = analysis
            .missing_skills
            .iter()
            .find(|s| matched.contains(s.as_str()))
        {
            return Err(ResponseViolation::SkillOverlap {
                file: analysis.file_name.clone(),
                skill: skill.clone(),
            });
        }
    }

    Ok(())
}
