use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gemini::GatewayError;
use crate::workflow::WorkflowError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Response format error: {0}")]
    ResponseFormat(String),

    #[error("Explanation unavailable")]
    ExplanationUnavailable,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<WorkflowError> for AppError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::MissingInput(msg) => AppError::MissingInput(msg),
            WorkflowError::OutOfOrder(msg) => AppError::Conflict(msg.to_string()),
            WorkflowError::AnalysisInFlight => {
                AppError::Conflict("an analysis is already in flight".to_string())
            }
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Parse(err) => AppError::ResponseFormat(err.to_string()),
            GatewayError::EmptyContent => {
                AppError::ResponseFormat("model returned empty content".to_string())
            }
            other => AppError::Transport(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput(msg) => (StatusCode::BAD_REQUEST, "MISSING_INPUT", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Transport(cause) => {
                tracing::error!("Transport error: {cause}");
                (
                    StatusCode::BAD_GATEWAY,
                    "TRANSPORT_ERROR",
                    "The analysis service could not be reached".to_string(),
                )
            }
            AppError::ResponseFormat(cause) => {
                tracing::error!("Response format error: {cause}");
                (
                    StatusCode::BAD_GATEWAY,
                    "RESPONSE_FORMAT_ERROR",
                    "The analysis service returned an unusable response".to_string(),
                )
            }
            AppError::ExplanationUnavailable => (
                StatusCode::BAD_GATEWAY,
                "EXPLANATION_UNAVAILABLE",
                "Could not fetch an explanation right now. Please try again.".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
