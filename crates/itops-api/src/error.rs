//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`TrackerError`] to HTTP status codes and renders every failure as
//! `{"error": <message>, "code": <status>}`. Internal failure details are
//! logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use itops_core::TrackerError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub error: String,
    /// The HTTP status code, repeated in the body.
    pub code: u16,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed request: unparseable body, path or query (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Business-rule rejection (400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Mutation of a terminal issue (403).
    #[error("{0}")]
    Forbidden(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: message,
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::NotFound(_) => Self::NotFound(err.to_string()),
            TrackerError::Validation(inner) => Self::Validation(inner.to_string()),
            TrackerError::Forbidden { .. } => Self::Forbidden(err.to_string()),
            TrackerError::Internal(msg) => Self::Internal(msg),
        }
    }
}
