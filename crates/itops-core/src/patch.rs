//! # Request Payloads
//!
//! Plain-data inputs to the lifecycle rules. Strings are kept raw so the
//! rules, not the transport, decide what is valid.

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// What an update does to the assignee.
///
/// Replaces the wire-level convention where `userId: 0` means "clear" and
/// an absent `userId` means "leave alone".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssigneeChange {
    /// The update does not touch the assignee.
    #[default]
    Keep,
    /// Remove the assignee. Forces the issue back to `PENDING`.
    Clear,
    /// Assign the given user.
    Assign(UserId),
}

impl AssigneeChange {
    /// Interpret a raw `userId` value where `0` is the clear sentinel.
    pub fn from_raw(raw: u64) -> Self {
        match UserId::new(raw) {
            Some(id) => Self::Assign(id),
            None => Self::Clear,
        }
    }
}

/// Input for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    /// Requested assignee. `None` and `Some(0)` both mean unassigned.
    pub user_id: Option<u64>,
}

impl NewIssue {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            user_id: None,
        }
    }

    pub fn assigned_to(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// The requested assignee with the zero sentinel folded into `None`.
    pub fn requested_assignee(&self) -> Option<UserId> {
        self.user_id.and_then(UserId::new)
    }
}

/// A partial update. Every `None` / [`AssigneeChange::Keep`] field is left
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssuePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Requested status in wire form; validated by the lifecycle rules.
    pub status: Option<String>,
    pub assignee: AssigneeChange,
}

impl IssuePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn assignee(mut self, change: AssigneeChange) -> Self {
        self.assignee = change;
        self
    }
}
