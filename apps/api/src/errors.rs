use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::llm_client::LlmError;
use crate::report::styler::StyleError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Report error: {0}")]
    Report(#[from] StyleError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upload(e) => (e.status(), "UPLOAD_ERROR", e.body_text()),
            AppError::Analysis(AnalysisError::Completion(LlmError::Timeout(after))) => {
                tracing::error!("LLM timed out after {after:?}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "LLM_TIMEOUT",
                    "The AI model did not respond in time".to_string(),
                )
            }
            AppError::Analysis(AnalysisError::Completion(e)) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Analysis(e @ (AnalysisError::Parse(_) | AnalysisError::Shape { .. })) => {
                tracing::error!("Unusable model output: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_OUTPUT_INVALID",
                    "The AI model returned an unreadable analysis; please try again".to_string(),
                )
            }
            AppError::Analysis(e @ AnalysisError::Encode { .. }) => {
                tracing::error!("Prompt encoding failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::Report(StyleError::NoSheets) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "The request has no section that can be written to a report".to_string(),
            ),
            AppError::Report(e) => {
                tracing::error!("Report error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REPORT_ERROR",
                    "The report could not be generated".to_string(),
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

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::analysis::normalizer::normalize;

    async fn status_and_code(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json["error"]["code"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let (status, code) = status_and_code(AppError::Validation("cv_text".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_timeout_maps_to_504() {
        let err = AppError::from(AnalysisError::from(LlmError::Timeout(Duration::from_secs(
            120,
        ))));
        let (status, code) = status_and_code(err).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(code, "LLM_TIMEOUT");
    }

    #[tokio::test]
    async fn test_api_failure_maps_to_502() {
        let err = AppError::from(AnalysisError::from(LlmError::Api {
            status: 500,
            message: "boom".to_string(),
        }));
        assert_eq!(
            status_and_code(err).await,
            (StatusCode::BAD_GATEWAY, "LLM_ERROR".to_string())
        );
    }

    #[tokio::test]
    async fn test_report_without_sheets_is_a_client_error() {
        assert_eq!(
            status_and_code(AppError::from(StyleError::NoSheets)).await,
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR".to_string())
        );
    }

    #[tokio::test]
    async fn test_parse_failure_maps_to_model_output_invalid() {
        let parse = normalize("bukan json").unwrap_err();
        let err = AppError::from(AnalysisError::from(parse));
        assert_eq!(
            status_and_code(err).await,
            (StatusCode::BAD_GATEWAY, "MODEL_OUTPUT_INVALID".to_string())
        );
    }
}
