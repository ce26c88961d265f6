//! # Issue and User Records

use serde::{Deserialize, Serialize};

use crate::identity::{IssueId, UserId};
use crate::status::IssueStatus;
use crate::temporal::Timestamp;

/// A user that issues can be assigned to.
///
/// Users come from a fixed directory loaded at startup and are never
/// mutated by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An issue as held by the store.
///
/// `assignee` is a snapshot of the user taken when the assignment was made.
/// The issue refers to the user by ID and does not own its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub assignee: Option<User>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Issue {
    /// ID of the assigned user, if any.
    pub fn assignee_id(&self) -> Option<UserId> {
        self.assignee.as_ref().map(|u| u.id)
    }

    /// Whether the issue has reached `COMPLETED` or `CANCELLED`.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the status/assignee pair is allowed to exist.
    pub fn is_consistent(&self) -> bool {
        !(self.status.requires_assignee() && self.assignee.is_none())
            && self.updated_at >= self.created_at
    }
}
