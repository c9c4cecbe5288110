use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Propagation policy: no error is recovered or retried internally. Every
/// failure at any pipeline stage becomes an HTTP error response here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream model error: {0}")]
    Upstream(#[from] GatewayError),

    #[error("Failed to parse model response")]
    ModelResponseParse,

    #[error("File read error: {0}")]
    FileRead(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                msg.clone(),
            ),
            AppError::Upstream(e) => {
                tracing::error!("Upstream model error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    e.to_string(),
                )
            }
            AppError::ModelResponseParse => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MODEL_RESPONSE_PARSE_ERROR",
                "Failed to parse model response".to_string(),
            ),
            AppError::FileRead(msg) => {
                tracing::error!("File read error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "FILE_READ_ERROR",
                    msg.clone(),
                )
            }
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
