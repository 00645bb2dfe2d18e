//! Workflow State Machine — owns the Landing → JD upload → resume upload →
//! analyze → results sequence and every piece of state accumulated along it.
//!
//! ARCHITECTURAL RULE: the transition methods below are the only mutation
//! surface for the job description, the resume set, and the analysis result.
//! Handlers never touch those fields directly.

pub mod handlers;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::report::AnalysisResult;
use crate::models::upload::{FileMeta, UploadedFile};

/// Message for the missing-JD analyze guard. Exact wording is part of the
/// workflow contract.
pub const MISSING_JD_MESSAGE: &str = "Job description is missing.";

/// Generic message shown for any analysis failure. The underlying cause goes
/// to the logs, never to the client.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "An error occurred during analysis. Please check the console for details.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    #[default]
    Landing,
    AwaitingJobDescription,
    AwaitingResumes,
    Analyzing,
    Error,
    Results,
}

#[derive(Debug, Error, PartialEq)]
pub enum WorkflowError {
    /// A required input is absent, or the workflow was invoked without it.
    #[error("{0}")]
    MissingInput(String),

    /// A transition arrived in a phase that does not accept it.
    #[error("workflow invoked out of order: {0}")]
    OutOfOrder(&'static str),

    /// Re-entry into analysis while a request is still in flight.
    #[error("an analysis is already in flight")]
    AnalysisInFlight,
}

/// Everything the caller needs to dispatch one analysis request. The
/// generation ties the eventual settlement back to this run: a settlement
/// whose generation no longer matches is ignored.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub generation: u64,
    pub job_description: UploadedFile,
    pub resumes: Vec<UploadedFile>,
}

#[derive(Debug, Default)]
pub struct Workflow {
    phase: WorkflowPhase,
    job_description: Option<UploadedFile>,
    resumes: Vec<UploadedFile>,
    result: Option<AnalysisResult>,
    error: Option<String>,
    /// Bumped on every reset; settlements carrying an older value are stale.
    generation: u64,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Landing → AwaitingJobDescription, on the user's "get started" action.
    pub fn start(&mut self) -> Result<(), WorkflowError> {
        match self.phase {
            WorkflowPhase::Landing => {
                self.phase = WorkflowPhase::AwaitingJobDescription;
                Ok(())
            }
            WorkflowPhase::Analyzing => Err(WorkflowError::AnalysisInFlight),
            _ => Err(WorkflowError::OutOfOrder(
                "workflow already started; reset to begin a new run",
            )),
        }
    }

    /// AwaitingJobDescription → AwaitingResumes, storing the supplied file.
    /// The no-file case is not reachable from a well-behaved client but is
    /// guarded anyway.
    pub fn submit_job_description(
        &mut self,
        file: Option<UploadedFile>,
    ) -> Result<(), WorkflowError> {
        match self.phase {
            WorkflowPhase::AwaitingJobDescription => {}
            WorkflowPhase::Analyzing => return Err(WorkflowError::AnalysisInFlight),
            _ => {
                return Err(WorkflowError::OutOfOrder(
                    "job description upload is only accepted after start",
                ))
            }
        }

        let file = file.ok_or_else(|| {
            WorkflowError::MissingInput("No job description file was supplied.".to_string())
        })?;

        self.job_description = Some(file);
        self.phase = WorkflowPhase::AwaitingResumes;
        Ok(())
    }

    /// AwaitingResumes → Analyzing. Stores the resume set and hands back an
    /// `AnalysisJob` for the caller to dispatch. Guards, in order: a request
    /// already in flight; a missing job description, which transitions to the
    /// Error phase with the exact contract message before any network call
    /// could happen; an out-of-phase invocation; an empty resume set.
    pub fn begin_analysis(
        &mut self,
        resumes: Vec<UploadedFile>,
    ) -> Result<AnalysisJob, WorkflowError> {
        if self.phase == WorkflowPhase::Analyzing {
            return Err(WorkflowError::AnalysisInFlight);
        }

        let Some(job_description) = self.job_description.clone() else {
            self.phase = WorkflowPhase::Error;
            self.error = Some(MISSING_JD_MESSAGE.to_string());
            return Err(WorkflowError::MissingInput(MISSING_JD_MESSAGE.to_string()));
        };

        if self.phase != WorkflowPhase::AwaitingResumes {
            return Err(WorkflowError::OutOfOrder(
                "analysis can only start from the resume upload step",
            ));
        }

        if resumes.is_empty() {
            return Err(WorkflowError::MissingInput(
                "At least one resume file is required.".to_string(),
            ));
        }

        self.resumes = resumes.clone();
        self.phase = WorkflowPhase::Analyzing;

        Ok(AnalysisJob {
            generation: self.generation,
            job_description,
            resumes,
        })
    }

    /// Analyzing → Results. Applied only when the generation still matches;
    /// a settlement from a run abandoned by reset is ignored. Returns whether
    /// the result was applied.
    pub fn complete_analysis(&mut self, generation: u64, result: AnalysisResult) -> bool {
        if !self.settlement_is_current(generation) {
            return false;
        }
        self.result = Some(result);
        self.phase = WorkflowPhase::Results;
        true
    }

    /// Analyzing → Error with the fixed generic message. The cause is logged
    /// for diagnostics only. Same staleness rule as `complete_analysis`.
    pub fn fail_analysis(&mut self, generation: u64, cause: &str) -> bool {
        if !self.settlement_is_current(generation) {
            return false;
        }
        error!("Analysis failed: {cause}");
        self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
        self.phase = WorkflowPhase::Error;
        true
    }

    fn settlement_is_current(&self, generation: u64) -> bool {
        if generation != self.generation || self.phase != WorkflowPhase::Analyzing {
            warn!(
                "Ignoring stale analysis settlement (generation {generation}, current {}, phase {:?})",
                self.generation, self.phase
            );
            return false;
        }
        true
    }

    /// Full reset to Landing from any phase: clears the job description, the
    /// resume set, the result, and the error, and bumps the generation so a
    /// still-pending request's settlement becomes inert.
    pub fn reset(&mut self) {
        self.phase = WorkflowPhase::Landing;
        self.job_description = None;
        self.resumes.clear();
        self.result = None;
        self.error = None;
        self.generation += 1;
    }

    /// Serializable snapshot for clients.
    pub fn view(&self) -> WorkflowView {
        match self.phase {
            WorkflowPhase::Landing => WorkflowView::Landing,
            WorkflowPhase::AwaitingJobDescription => WorkflowView::AwaitingJobDescription,
            WorkflowPhase::AwaitingResumes => WorkflowView::AwaitingResumes {
                job_description: self
                    .job_description
                    .as_ref()
                    .map(UploadedFile::meta)
                    .expect("AwaitingResumes always holds a job description"),
            },
            WorkflowPhase::Analyzing => WorkflowView::Analyzing {
                job_description: self
                    .job_description
                    .as_ref()
                    .map(UploadedFile::meta)
                    .expect("Analyzing always holds a job description"),
                resume_count: self.resumes.len(),
            },
            WorkflowPhase::Error => WorkflowView::Error {
                message: self
                    .error
                    .clone()
                    .unwrap_or_else(|| ANALYSIS_FAILED_MESSAGE.to_string()),
            },
            WorkflowPhase::Results => WorkflowView::Results {
                result: self
                    .result
                    .clone()
                    .expect("Results always holds an analysis result"),
            },
        }
    }
}

/// What clients see of the workflow. The Results variant carries the
/// AnalysisResult exactly as the gateway validated it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WorkflowView {
    Landing,
    AwaitingJobDescription,
    AwaitingResumes {
        job_description: FileMeta,
    },
    Analyzing {
        job_description: FileMeta,
        resume_count: usize,
    },
    Error {
        message: String,
    },
    Results {
        result: AnalysisResult,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{JdSkills, ResumeAnalysis, Verdict};
    use bytes::Bytes;

    fn file(name: &str) -> UploadedFile {
        UploadedFile::new(name, "application/pdf", Bytes::from_static(b"%PDF-1.4"))
    }

    fn fixture_result(names_and_scores: &[(&str, u32, Verdict)]) -> AnalysisResult {
        AnalysisResult {
            jd_skills: JdSkills {
                hard_skills: vec!["Rust".to_string()],
                soft_skills: vec!["Communication".to_string()],
            },
            resume_analyses: names_and_scores
                .iter()
                .map(|(name, score, verdict)| ResumeAnalysis {
                    file_name: name.to_string(),
                    final_score: *score,
                    verdict: *verdict,
                    hard_skill_score: *score,
                    soft_skill_score: *score,
                    matched_skills: vec![],
                    missing_skills: vec![],
                    summary: String::new(),
                })
                .collect(),
        }
    }

    fn workflow_at_resumes() -> Workflow {
        let mut wf = Workflow::new();
        wf.start().unwrap();
        wf.submit_job_description(Some(file("jd.pdf"))).unwrap();
        wf
    }

    #[test]
    fn test_happy_path_reaches_results_with_result_unmodified() {
        let mut wf = workflow_at_resumes();
        let job = wf
            .begin_analysis(vec![file("alice.pdf"), file("bob.pdf")])
            .unwrap();
        assert_eq!(wf.phase(), WorkflowPhase::Analyzing);
        assert_eq!(job.resumes.len(), 2);

        let result = fixture_result(&[("alice.pdf", 82, Verdict::High), ("bob.pdf", 45, Verdict::Low)]);
        assert!(wf.complete_analysis(job.generation, result.clone()));
        assert_eq!(wf.phase(), WorkflowPhase::Results);
        assert_eq!(wf.result(), Some(&result));
    }

    #[test]
    fn test_analyze_without_job_description_enters_error_with_exact_message() {
        let mut wf = Workflow::new();
        let err = wf.begin_analysis(vec![file("alice.pdf")]).unwrap_err();
        // No AnalysisJob was produced, so no network call can have happened.
        assert_eq!(err, WorkflowError::MissingInput(MISSING_JD_MESSAGE.to_string()));
        assert_eq!(wf.phase(), WorkflowPhase::Error);
        assert_eq!(
            wf.view(),
            WorkflowView::Error {
                message: "Job description is missing.".to_string()
            }
        );
    }

    #[test]
    fn test_analyze_with_empty_resume_set_is_rejected() {
        let mut wf = workflow_at_resumes();
        let err = wf.begin_analysis(vec![]).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingInput(_)));
        assert_eq!(wf.phase(), WorkflowPhase::AwaitingResumes);
    }

    #[test]
    fn test_reentry_while_analyzing_is_rejected() {
        let mut wf = workflow_at_resumes();
        wf.begin_analysis(vec![file("alice.pdf")]).unwrap();
        let err = wf.begin_analysis(vec![file("bob.pdf")]).unwrap_err();
        assert_eq!(err, WorkflowError::AnalysisInFlight);
    }

    #[test]
    fn test_failure_shows_generic_message_not_cause() {
        let mut wf = workflow_at_resumes();
        let job = wf.begin_analysis(vec![file("alice.pdf")]).unwrap();
        assert!(wf.fail_analysis(job.generation, "connection refused (10.0.0.3:443)"));
        assert_eq!(wf.phase(), WorkflowPhase::Error);
        let WorkflowView::Error { message } = wf.view() else {
            panic!("expected error view");
        };
        assert_eq!(message, ANALYSIS_FAILED_MESSAGE);
        assert!(!message.contains("connection refused"));
    }

    #[test]
    fn test_settlement_after_reset_is_ignored() {
        let mut wf = workflow_at_resumes();
        let job = wf.begin_analysis(vec![file("alice.pdf")]).unwrap();

        wf.reset();
        assert_eq!(wf.phase(), WorkflowPhase::Landing);

        let result = fixture_result(&[("alice.pdf", 82, Verdict::High)]);
        assert!(!wf.complete_analysis(job.generation, result));
        assert_eq!(wf.phase(), WorkflowPhase::Landing);
        assert_eq!(wf.result(), None);

        assert!(!wf.fail_analysis(job.generation, "late transport error"));
        assert_eq!(wf.phase(), WorkflowPhase::Landing);
    }

    #[test]
    fn test_stale_settlement_cannot_corrupt_a_new_run() {
        let mut wf = workflow_at_resumes();
        let first = wf.begin_analysis(vec![file("alice.pdf")]).unwrap();
        wf.reset();

        // A fresh run reaches Analyzing again; the old settlement must not apply.
        wf.start().unwrap();
        wf.submit_job_description(Some(file("jd2.pdf"))).unwrap();
        let second = wf.begin_analysis(vec![file("carol.pdf")]).unwrap();
        assert_ne!(first.generation, second.generation);

        let stale = fixture_result(&[("alice.pdf", 82, Verdict::High)]);
        assert!(!wf.complete_analysis(first.generation, stale));
        assert_eq!(wf.phase(), WorkflowPhase::Analyzing);

        let fresh = fixture_result(&[("carol.pdf", 61, Verdict::Medium)]);
        assert!(wf.complete_analysis(second.generation, fresh.clone()));
        assert_eq!(wf.result(), Some(&fresh));
    }

    #[test]
    fn test_reset_is_idempotent_from_results_and_error() {
        let mut wf = workflow_at_resumes();
        let job = wf.begin_analysis(vec![file("alice.pdf")]).unwrap();
        wf.complete_analysis(job.generation, fixture_result(&[("alice.pdf", 82, Verdict::High)]));
        assert_eq!(wf.phase(), WorkflowPhase::Results);

        wf.reset();
        assert_eq!(wf.view(), WorkflowView::Landing);
        assert_eq!(wf.result(), None);

        let mut failed = workflow_at_resumes();
        let job = failed.begin_analysis(vec![file("bob.pdf")]).unwrap();
        failed.fail_analysis(job.generation, "boom");
        failed.reset();
        assert_eq!(failed.view(), WorkflowView::Landing);

        // Resetting again changes nothing observable.
        failed.reset();
        assert_eq!(failed.view(), WorkflowView::Landing);
    }

    #[test]
    fn test_submit_job_description_without_file_is_rejected() {
        let mut wf = Workflow::new();
        wf.start().unwrap();
        let err = wf.submit_job_description(None).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingInput(_)));
        assert_eq!(wf.phase(), WorkflowPhase::AwaitingJobDescription);
    }

    #[test]
    fn test_out_of_order_invocations_are_rejected() {
        let mut wf = Workflow::new();
        assert!(matches!(
            wf.submit_job_description(Some(file("jd.pdf"))).unwrap_err(),
            WorkflowError::OutOfOrder(_)
        ));

        wf.start().unwrap();
        assert!(matches!(wf.start().unwrap_err(), WorkflowError::OutOfOrder(_)));
    }

    #[test]
    fn test_views_expose_metadata_not_bytes() {
        let mut wf = workflow_at_resumes();
        let WorkflowView::AwaitingResumes { job_description } = wf.view() else {
            panic!("expected awaiting-resumes view");
        };
        assert_eq!(job_description.name, "jd.pdf");

        wf.begin_analysis(vec![file("alice.pdf"), file("bob.pdf")]).unwrap();
        let json = serde_json::to_value(wf.view()).unwrap();
        assert_eq!(json["phase"], "analyzing");
        assert_eq!(json["resume_count"], 2);
    }
}
