use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::modules::podcast_summary::crud::StoreError;
use crate::services::gemini::GenerationError;

const GENERATION_FAILED: &str = "Failed to generate podcast script due to an internal server error.";
const CONTENT_BLOCKED: &str = "Content blocked due to safety settings.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    Validation(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("Content blocked due to safety settings: {0}")]
    ContentPolicy(String),
    #[error("{0}")]
    NotFound(String),
    /// Message is safe to show to clients; internals are logged before this is built.
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::ContentPolicy(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(details) => ErrorResponse {
                error: "Invalid request body".to_string(),
                details: Some(details),
            },
            ApiError::ContentPolicy(details) => ErrorResponse {
                error: CONTENT_BLOCKED.to_string(),
                details: Some(details),
            },
            ApiError::PayloadTooLarge(message)
            | ApiError::NotFound(message)
            | ApiError::Internal(message) => ErrorResponse {
                error: message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge("Input text too long.".to_string());
        }
        ApiError::Validation(rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound("Podcast not found".to_string()),
            StoreError::Backend(detail) => {
                tracing::error!(%detail, "Podcast summary store failure");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::ContentBlocked(details) => {
                tracing::warn!(%details, "Script generation blocked by provider safety settings");
                ApiError::ContentPolicy(details)
            }
            GenerationError::EmptyInput => ApiError::Validation(err.to_string()),
            GenerationError::InputTooLong(_) => ApiError::PayloadTooLarge(err.to_string()),
            other => {
                tracing::error!(error = %other, "Error calling Gemini API");
                ApiError::Internal(GENERATION_FAILED.to_string())
            }
        }
    }
}
