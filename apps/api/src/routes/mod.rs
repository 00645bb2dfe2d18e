pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::workflow::handlers;

/// Uploads are held in memory for the run; cap the request body well above
/// typical resume sizes but below anything that could exhaust the process.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/workflow", get(handlers::handle_get_workflow))
        .route("/api/v1/workflow/start", post(handlers::handle_start))
        .route(
            "/api/v1/workflow/job-description",
            post(handlers::handle_submit_job_description),
        )
        .route("/api/v1/workflow/analyze", post(handlers::handle_analyze))
        .route("/api/v1/workflow/results", get(handlers::handle_results))
        .route(
            "/api/v1/workflow/results/export",
            get(handlers::handle_export),
        )
        .route("/api/v1/workflow/explain", post(handlers::handle_explain))
        .route("/api/v1/workflow/reset", post(handlers::handle_reset))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
