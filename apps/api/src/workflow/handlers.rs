//! Axum route handlers driving the workflow state machine.
//!
//! Handlers collect file inputs, trigger transitions, and render the
//! machine's current view. The analyze handler is the only place the batch
//! call is dispatched; it releases the state lock before awaiting the
//! network so a reset can proceed while a request is in flight.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::{write_results_csv, EXPORT_FILE_NAME};
use crate::models::report::{JdSkills, ResumeAnalysis};
use crate::models::upload::UploadedFile;
use crate::state::AppState;
use crate::workflow::{WorkflowError, WorkflowView, MISSING_JD_MESSAGE};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub file_name: String,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub jd_skills: JdSkills,
    /// Cards in ranked (score-descending) order.
    pub ranked: Vec<ResumeCard>,
}

#[derive(Debug, Serialize)]
pub struct ResumeCard {
    #[serde(flatten)]
    pub analysis: ResumeAnalysis,
    /// `missing_skills` plus any JD skill the model mentioned in neither list.
    pub display_missing_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/workflow
///
/// Current workflow view; clients re-render from this after every action.
pub async fn handle_get_workflow(State(state): State<AppState>) -> Json<WorkflowView> {
    Json(state.workflow.lock().await.view())
}

/// POST /api/v1/workflow/start
pub async fn handle_start(
    State(state): State<AppState>,
) -> Result<Json<WorkflowView>, AppError> {
    let mut workflow = state.workflow.lock().await;
    workflow.start()?;
    Ok(Json(workflow.view()))
}

/// POST /api/v1/workflow/job-description
///
/// Multipart upload of a single job-description file.
pub async fn handle_submit_job_description(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<WorkflowView>, AppError> {
    let mut files = collect_files(&mut multipart).await?;
    let file = match files.len() {
        0 | 1 => files.pop(),
        n => {
            return Err(AppError::Validation(format!(
                "expected a single job description file, got {n}"
            )))
        }
    };

    let mut workflow = state.workflow.lock().await;
    workflow.submit_job_description(file)?;
    Ok(Json(workflow.view()))
}

/// POST /api/v1/workflow/analyze
///
/// Multipart upload of one or more resume files; dispatches the batch
/// analysis. Guard and settlement each take the lock briefly; the network
/// await runs unlocked. A reset during the await makes the settlement inert.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<WorkflowView>, AppError> {
    let resumes = collect_files(&mut multipart).await?;

    let job = {
        let mut workflow = state.workflow.lock().await;
        match workflow.begin_analysis(resumes) {
            Ok(job) => job,
            // The missing-JD guard is surfaced as the Error phase, not as an
            // HTTP failure, and no network call is made.
            Err(WorkflowError::MissingInput(msg)) if msg == MISSING_JD_MESSAGE => {
                return Ok(Json(workflow.view()));
            }
            Err(e) => return Err(e.into()),
        }
    };

    let outcome = state
        .backend
        .submit_batch_analysis(&job.job_description, &job.resumes)
        .await;

    let mut workflow = state.workflow.lock().await;
    match outcome {
        Ok(result) => {
            workflow.complete_analysis(job.generation, result);
        }
        Err(e) => {
            workflow.fail_analysis(job.generation, &e.to_string());
        }
    }
    Ok(Json(workflow.view()))
}

/// GET /api/v1/workflow/results
///
/// Ranked result cards; 404 until an analysis has completed.
pub async fn handle_results(
    State(state): State<AppState>,
) -> Result<Json<ResultsResponse>, AppError> {
    let workflow = state.workflow.lock().await;
    let result = workflow
        .result()
        .ok_or_else(|| AppError::NotFound("no analysis result available".to_string()))?;

    let ranked = result
        .ranked()
        .into_iter()
        .map(|analysis| ResumeCard {
            display_missing_skills: analysis.missing_for_display(&result.jd_skills),
            analysis: analysis.clone(),
        })
        .collect();

    Ok(Json(ResultsResponse {
        jd_skills: result.jd_skills.clone(),
        ranked,
    }))
}

/// GET /api/v1/workflow/results/export
///
/// CSV download of the current result under the fixed file name.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let csv = {
        let workflow = state.workflow.lock().await;
        let result = workflow
            .result()
            .ok_or_else(|| AppError::NotFound("no analysis result available".to_string()))?;
        write_results_csv(result)?
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}

/// POST /api/v1/workflow/explain
///
/// Per-card explanation fetch. Reads a snapshot of the stored analysis under
/// the lock, then calls the backend unlocked — explanation requests for
/// different cards run independently and never mutate workflow state.
pub async fn handle_explain(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<ExplainResponse>, AppError> {
    let (analysis, skills) = {
        let workflow = state.workflow.lock().await;
        let result = workflow
            .result()
            .ok_or_else(|| AppError::NotFound("no analysis result available".to_string()))?;
        let analysis = result
            .resume_analyses
            .iter()
            .find(|a| a.file_name == request.file_name)
            .ok_or_else(|| {
                AppError::NotFound(format!("no analysis for file {}", request.file_name))
            })?
            .clone();
        (analysis, result.jd_skills.clone())
    };

    let explanation = state.backend.fetch_explanation(&analysis, &skills).await?;

    Ok(Json(ExplainResponse {
        file_name: request.file_name,
        explanation,
    }))
}

/// POST /api/v1/workflow/reset
///
/// Full reset to Landing — also the "Try Again" action from the Error phase.
pub async fn handle_reset(State(state): State<AppState>) -> Json<WorkflowView> {
    let mut workflow = state.workflow.lock().await;
    workflow.reset();
    Json(workflow.view())
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Collects every file field from a multipart body, preserving order.
/// Fields without a file name are ignored.
async fn collect_files(multipart: &mut Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read uploaded file: {e}")))?;
        files.push(UploadedFile::new(name, content_type, bytes));
    }
    Ok(files)
}
