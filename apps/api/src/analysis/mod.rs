// The structured-extraction contract between the workflow and the remote
// model: batch analysis (schema-constrained) and per-candidate explanations
// (free text). All calls go through the gemini module.

pub mod prompts;
pub mod schema;
pub mod validate;

use async_trait::async_trait;
use tracing::{error, info};

use crate::errors::AppError;
use crate::gemini::{GeminiClient, Part};
use crate::models::report::{AnalysisResult, JdSkills, ResumeAnalysis};
use crate::models::upload::UploadedFile;

/// The analysis backend trait. Carried in `AppState` as
/// `Arc<dyn AnalysisBackend>` so handler tests can inject a mock.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// One request carrying the JD, every resume, the HR-analyst instruction,
    /// and the strict output schema. Returns a fully validated result.
    async fn submit_batch_analysis(
        &self,
        job_description: &UploadedFile,
        resumes: &[UploadedFile],
    ) -> Result<AnalysisResult, AppError>;

    /// Free-text fit assessment for a single candidate. Does not touch the
    /// stored result; the caller owns where the text ends up.
    async fn fetch_explanation(
        &self,
        analysis: &ResumeAnalysis,
        skills: &JdSkills,
    ) -> Result<String, AppError>;
}

#[async_trait]
impl AnalysisBackend for GeminiClient {
    async fn submit_batch_analysis(
        &self,
        job_description: &UploadedFile,
        resumes: &[UploadedFile],
    ) -> Result<AnalysisResult, AppError> {
        if resumes.is_empty() {
            return Err(AppError::MissingInput(
                "at least one resume file is required".to_string(),
            ));
        }

        let mut parts = Vec::with_capacity(resumes.len() + 3);
        parts.push(Part::text(prompts::JD_PREAMBLE));
        parts.push(Part::file(&job_description.content_type, &job_description.bytes));
        parts.push(Part::text(prompts::RESUMES_PREAMBLE));
        for resume in resumes {
            parts.push(Part::file(&resume.content_type, &resume.bytes));
        }

        info!(
            "Submitting batch analysis: jd={}, resumes={}",
            job_description.name,
            resumes.len()
        );

        let result: AnalysisResult = self
            .generate_json(parts, prompts::HR_ANALYST_SYSTEM, schema::batch_response_schema())
            .await?;

        let submitted: Vec<String> = resumes.iter().map(|r| r.name.clone()).collect();
        validate::validate_result(&result, &submitted)
            .map_err(|violation| AppError::ResponseFormat(violation.to_string()))?;

        Ok(result)
    }

    async fn fetch_explanation(
        &self,
        analysis: &ResumeAnalysis,
        skills: &JdSkills,
    ) -> Result<String, AppError> {
        let prompt = prompts::explanation_prompt(analysis, skills);

        self.generate_text(&prompt).await.map_err(|e| {
            error!("Explanation fetch failed for {}: {e}", analysis.file_name);
            AppError::ExplanationUnavailable
        })
    }
}
