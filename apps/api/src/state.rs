use std::sync::Arc;

use tokio::sync::Mutex;

use crate::analysis::AnalysisBackend;
use crate::workflow::Workflow;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// One workflow instance per server — the service is single-user and
/// session-scoped.
/// Handlers hold the lock only to transition, never across a network await.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<Mutex<Workflow>>,
    /// Pluggable analysis backend. Production: `GeminiClient`. Tests: a mock.
    pub backend: Arc<dyn AnalysisBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            workflow: Arc::new(Mutex::new(Workflow::new())),
            backend,
        }
    }
}
