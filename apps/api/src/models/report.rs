//! Analysis Result Model — the validated structure produced by the model
//! gateway and consumed by the results view and the CSV export.
//!
//! Wire names are camelCase because they are part of the schema contract
//! sent to the remote model (`fileName`, `finalScore`, …).

use serde::{Deserialize, Serialize};

/// The remote model's categorical judgment of resume-to-job fit.
/// Serde enforces the closed set — anything else fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Verdict::High => "High",
            Verdict::Medium => "Medium",
            Verdict::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Hard and soft skills extracted from the job description.
/// Both lists may be empty but must be present in a valid result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdSkills {
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
}

/// Per-resume record scored by the remote model against the JD skill set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    /// Must correspond to one of the submitted resume file names.
    pub file_name: String,
    pub final_score: u32,
    pub verdict: Verdict,
    pub hard_skill_score: u32,
    pub soft_skill_score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub summary: String,
}

impl ResumeAnalysis {
    /// Missing skills for display. The model may omit skills it judged
    /// irrelevant from both lists; anything it mentioned in neither list is
    /// treated as missing.
    pub fn missing_for_display(&self, skills: &JdSkills) -> Vec<String> {
        let mut missing = self.missing_skills.clone();
        for skill in skills.hard_skills.iter().chain(skills.soft_skills.iter()) {
            let mentioned = self.matched_skills.contains(skill) || self.missing_skills.contains(skill);
            if !mentioned && !missing.contains(skill) {
                missing.push(skill.clone());
            }
        }
        missing
    }
}

/// One skill set plus one analysis per submitted resume. Constructed only by
/// the gateway after validation; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub jd_skills: JdSkills,
    pub resume_analyses: Vec<ResumeAnalysis>,
}

impl AnalysisResult {
    /// Analyses ordered by final score, highest first. Stable, so equal
    /// scores keep their submission order.
    pub fn ranked(&self) -> Vec<&ResumeAnalysis> {
        let mut ordered: Vec<&ResumeAnalysis> = self.resume_analyses.iter().collect();
        ordered.sort_by(|a, b| b.final_score.cmp(&a.final_score));
        ordered
    }
}
