//! # API Error Taxonomy
//!
//! Every endpoint failure maps into one of four outcomes. The wire envelope
//! carries only a generic label; internal detail stays server-side for
//! operator logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::pieces::{HookError, RenderError, StoreError, WriteError};

/// Result type for endpoint orchestration
pub type ApiResult<T> = Result<T, ApiError>;

/// Endpoint failure taxonomy
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unparsable identifier
    #[error("bad request")]
    BadRequest,

    /// No visible (or editable) matching piece
    #[error("not found")]
    NotFound,

    /// Write-pipeline conversion rejected the input. Reported to the caller
    /// like any other internal failure at this layer.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Query, render, conversion, or hook failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this outcome
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wire label. Never exposes internal detail.
    pub fn label(&self) -> &'static str {
        match self {
            ApiError::BadRequest => "bad request",
            ApiError::NotFound => "notfound",
            ApiError::Validation(_) | ApiError::Internal(_) => "error",
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::internal(err)
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        ApiError::internal(err)
    }
}

impl From<HookError> for ApiError {
    fn from(err: HookError) -> Self {
        ApiError::internal(err)
    }
}

impl From<WriteError> for ApiError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Invalid(msg) => ApiError::Validation(msg),
            other => ApiError::internal(other),
        }
    }
}

/// JSON error envelope sent to callers
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.label().to_string(),
        });
        (status, body).into_response()
    }
}
