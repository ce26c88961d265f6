//! # Issue Routes
//!
//! - `POST  /issue`: create an issue
//! - `GET   /issues`: list issues, optionally `?status=<STATUS>`
//! - `GET   /issue/{id}`: fetch one issue
//! - `PATCH /issue/{id}`: partially update an issue

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use itops_core::{AssigneeChange, Issue, IssuePatch, NewIssue, TrackerError};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::extractors::{extract_issue_id, extract_json, extract_query};
use crate::routes::users::UserView;
use crate::state::AppState;

/// Assemble the issue router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/issue", post(create_issue))
        .route("/issues", get(list_issues))
        .route("/issue/{id}", get(get_issue).patch(update_issue))
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// An issue as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueView {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// One of `PENDING`, `IN_PROGRESS`, `COMPLETED`, `CANCELLED`.
    pub status: String,
    /// Omitted when the issue is unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Issue> for IssueView {
    fn from(issue: Issue) -> Self {
        Self {
            id: issue.id.get(),
            title: issue.title,
            description: issue.description,
            status: issue.status.as_str().to_string(),
            user: issue.assignee.map(UserView::from),
            created_at: *issue.created_at.as_datetime(),
            updated_at: *issue.updated_at.as_datetime(),
        }
    }
}

/// `GET /issues` response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssueList {
    pub issues: Vec<IssueView>,
}

/// `POST /issue` body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Assignee. Absent, `null` or `0` leaves the issue unassigned.
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl From<CreateIssueRequest> for NewIssue {
    fn from(req: CreateIssueRequest) -> Self {
        NewIssue {
            title: req.title,
            description: req.description,
            user_id: req.user_id,
        }
    }
}

/// `PATCH /issue/{id}` body. Every field is optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    /// `0` clears the assignee and resets the issue to `PENDING`. Absent or
    /// `null` leaves the assignee alone.
    pub user_id: Option<u64>,
}

impl From<UpdateIssueRequest> for IssuePatch {
    fn from(req: UpdateIssueRequest) -> Self {
        let assignee = req
            .user_id
            .map_or(AssigneeChange::Keep, AssigneeChange::from_raw);
        IssuePatch {
            title: req.title,
            description: req.description,
            status: req.status,
            assignee,
        }
    }
}

/// `GET /issues` query.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Status filter. Empty means no filter.
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /issue: Create an issue.
#[utoipa::path(
    post,
    path = "/issue",
    request_body = CreateIssueRequest,
    responses(
        (status = 201, description = "Issue created", body = IssueView),
        (status = 400, description = "Malformed body or rejected by validation", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn create_issue(
    State(state): State<AppState>,
    body: Result<Json<CreateIssueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IssueView>), AppError> {
    let req = extract_json(body)?;
    let issue = state.tracker.create_issue(req.into())?;
    Ok((StatusCode::CREATED, Json(issue.into())))
}

/// GET /issues: List issues in ascending ID order.
#[utoipa::path(
    get,
    path = "/issues",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching issues", body = IssueList),
        (status = 400, description = "Unknown status filter", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn list_issues(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<IssueList>, AppError> {
    let query = extract_query(query)?;
    let issues = state.tracker.issues(query.status.as_deref())?;
    Ok(Json(IssueList {
        issues: issues.into_iter().map(IssueView::from).collect(),
    }))
}

/// GET /issue/{id}: Fetch one issue.
#[utoipa::path(
    get,
    path = "/issue/{id}",
    params(("id" = u64, Path, description = "Issue ID")),
    responses(
        (status = 200, description = "The issue", body = IssueView),
        (status = 400, description = "Invalid issue ID", body = crate::error::ErrorBody),
        (status = 404, description = "Issue not found", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn get_issue(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<IssueView>, AppError> {
    let id = extract_issue_id(id)?;
    Ok(Json(state.tracker.issue(id)?.into()))
}

/// PATCH /issue/{id}: Partially update an issue.
///
/// A terminal issue answers 403 whatever the body holds, so the issue is
/// looked up before the body is decoded.
#[utoipa::path(
    patch,
    path = "/issue/{id}",
    params(("id" = u64, Path, description = "Issue ID")),
    request_body = UpdateIssueRequest,
    responses(
        (status = 200, description = "Updated issue", body = IssueView),
        (status = 400, description = "Malformed body or rejected by validation", body = crate::error::ErrorBody),
        (status = 403, description = "Issue is COMPLETED or CANCELLED", body = crate::error::ErrorBody),
        (status = 404, description = "Issue not found", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn update_issue(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateIssueRequest>, JsonRejection>,
) -> Result<Json<IssueView>, AppError> {
    let id = extract_issue_id(id)?;
    let current = state.tracker.issue(id)?;
    if current.is_terminal() {
        return Err(TrackerError::Forbidden {
            id,
            status: current.status,
        }
        .into());
    }
    let req = extract_json(body)?;
    let issue = state.tracker.update_issue(id, req.into())?;
    Ok(Json(issue.into()))
}
