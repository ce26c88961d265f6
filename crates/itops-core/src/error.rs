//! # Error Types
//!
//! The tracker's rejection taxonomy. Every failure is deterministic given
//! the same input and store contents, so none of these are retried.
//!
//! - [`TrackerError::Validation`]: malformed or semantically invalid input.
//! - [`TrackerError::NotFound`]: unknown issue ID.
//! - [`TrackerError::Forbidden`]: mutation of a terminal issue.
//! - [`TrackerError::Internal`]: store-level failure that should not happen.

use thiserror::Error;

use crate::identity::IssueId;
use crate::status::IssueStatus;

/// Top-level error for tracker operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// No issue with the given ID exists.
    #[error("issue {0} not found")]
    NotFound(IssueId),

    /// The request violates a business rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The issue is terminal and can no longer change.
    #[error("issue {id} is {status} and can no longer be modified")]
    Forbidden {
        /// The issue that was targeted.
        id: IssueId,
        /// Its terminal status.
        status: IssueStatus,
    },

    /// Unexpected store failure.
    #[error("internal failure: {0}")]
    Internal(String),
}

/// Reasons an otherwise well-formed request is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// The status string is not one of the four known statuses.
    #[error("unknown status: {0:?}")]
    UnknownStatus(String),

    /// The referenced user does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(u64),

    /// The target status needs an assignee and the issue has none.
    #[error("an issue without an assignee cannot be {0}")]
    AssigneeRequired(IssueStatus),
}
