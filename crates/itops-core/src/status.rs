//! # Issue Status
//!
//! The four lifecycle states of an issue.
//!
//! ## States
//!
//! ```text
//!            ┌──────────────┐
//!   ┌───────▶│   PENDING    │◀──────┐
//!   │        └──────┬───────┘       │
//!   │               │ assign        │ clear assignee
//!   │               ▼               │
//!   │        ┌──────────────┐       │
//!   │        │ IN_PROGRESS  │───────┘
//!   │        └──────┬───────┘
//!   │               │
//!   ▼               ▼
//! CANCELLED     COMPLETED      (both terminal)
//! ```
//!
//! Any non-terminal state may move to any other state as long as the
//! target does not require an assignee the issue lacks. The transition
//! rules themselves live in `itops-state`.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an issue.
///
/// Serialized in `SCREAMING_SNAKE_CASE` to match the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    /// Waiting to be picked up. The only status an unassigned issue may
    /// hold besides `Cancelled`.
    Pending,
    /// Being worked on by the assignee.
    InProgress,
    /// Done (terminal).
    Completed,
    /// Abandoned (terminal).
    Cancelled,
}

impl IssueStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [IssueStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Parse the wire representation. Matching is exact and case-sensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether no further mutation is allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether an issue in this status must have an assignee.
    pub fn requires_assignee(&self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
