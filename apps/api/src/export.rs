//! CSV export of an analysis result — one row per resume in ranked order,
//! with standard CSV quoting so spreadsheet tools can open the file as-is.

use anyhow::{Context, Result};

use crate::models::report::AnalysisResult;

/// Fixed download file name for the export.
pub const EXPORT_FILE_NAME: &str = "resume_analysis_results.csv";

const HEADERS: [&str; 8] = [
    "File Name",
    "Final Score",
    "Verdict",
    "Hard Skill Score",
    "Soft Skill Score",
    "Matched Skills",
    "Missing Skills",
    "Summary",
];

/// Multi-valued fields are joined with this separator inside a single cell.
const SKILL_SEPARATOR: &str = "; ";

pub fn write_results_csv(result: &AnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADERS)
        .context("failed to write CSV header")?;

    for analysis in result.ranked() {
        writer
            .write_record([
                analysis.file_name.clone(),
                analysis.final_score.to_string(),
                analysis.verdict.to_string(),
                analysis.hard_skill_score.to_string(),
                analysis.soft_skill_score.to_string(),
                analysis.matched_skills.join(SKILL_SEPARATOR),
                analysis.missing_skills.join(SKILL_SEPARATOR),
                analysis.summary.clone(),
            ])
            .with_context(|| format!("failed to write CSV row for {}", analysis.file_name))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
