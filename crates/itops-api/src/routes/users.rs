//! # User Routes
//!
//! - `GET /users`: the fixed user directory, for assignee pickers.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use itops_core::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Assemble the user router.
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

/// A user as returned to clients, also embedded in issues as `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: u64,
    pub name: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name,
        }
    }
}

/// `GET /users` response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserList {
    pub users: Vec<UserView>,
}

/// GET /users: all users, ascending by ID.
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "All users", body = UserList)),
    tag = "users"
)]
pub(crate) async fn list_users(State(state): State<AppState>) -> Json<UserList> {
    Json(UserList {
        users: state.tracker.users().into_iter().map(UserView::from).collect(),
    })
}
