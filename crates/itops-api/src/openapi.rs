//! # OpenAPI Document Assembly
//!
//! Collects the utoipa-documented routes into one document served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "itops issue tracker",
        description = "Create, list, fetch and partially update issues. Issues move through PENDING, IN_PROGRESS, COMPLETED and CANCELLED; IN_PROGRESS and COMPLETED need an assignee, COMPLETED and CANCELLED are final."
    ),
    servers((url = "http://localhost:8080", description = "Local development server")),
    paths(
        crate::routes::issues::create_issue,
        crate::routes::issues::list_issues,
        crate::routes::issues::get_issue,
        crate::routes::issues::update_issue,
        crate::routes::users::list_users,
    ),
    components(schemas(
        crate::routes::issues::IssueView,
        crate::routes::issues::IssueList,
        crate::routes::issues::CreateIssueRequest,
        crate::routes::issues::UpdateIssueRequest,
        crate::routes::users::UserView,
        crate::routes::users::UserList,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "issues", description = "Issue lifecycle"),
        (name = "users", description = "User directory"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
