//! # Request Extraction Helpers
//!
//! Handlers take `Result<Json<T>, JsonRejection>` (and likewise for `Path`
//! and `Query`) so rejections render as the standard error body instead of
//! axum's plain-text defaults.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use itops_core::IssueId;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract query parameters, mapping parse errors to [`AppError::BadRequest`].
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract an issue ID from the path. Anything but a non-negative integer is
/// a bad request.
pub fn extract_issue_id(result: Result<Path<String>, PathRejection>) -> Result<IssueId, AppError> {
    let Path(raw) = result.map_err(|err| AppError::BadRequest(err.body_text()))?;
    // `u64::from_str` would also take a leading `+`.
    if !raw.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
        return Err(invalid_issue_id(&raw));
    }
    raw.parse::<u64>()
        .map(IssueId)
        .map_err(|_| invalid_issue_id(&raw))
}

fn invalid_issue_id(raw: &str) -> AppError {
    AppError::BadRequest(format!("invalid issue id: {raw:?}"))
}
