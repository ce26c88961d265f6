//! # Issue Lifecycle Rules
//!
//! Pure decision functions. Given the current issue and a request they
//! return the next state or a rejection; they never write. The store is
//! consulted only to resolve user IDs.
//!
//! ## Update ordering
//!
//! ```text
//! terminal? ──yes──▶ Forbidden
//!     │ no
//!     ▼
//! title / description
//!     │
//!     ▼
//! assignee ── Clear ──▶ assignee = none, status = PENDING (final)
//!     │  └── Assign ──▶ assignee = user; PENDING → IN_PROGRESS if no status sent
//!     ▼
//! status ──▶ must be known; IN_PROGRESS / COMPLETED need an assignee
//! ```
//!
//! Clearing the assignee always wins. An explicit status that fits the
//! resulting assignee wins over auto-promotion. Auto-promotion only fires
//! when no status is sent.

use itops_core::{
    AssigneeChange, Issue, IssuePatch, IssueStatus, NewIssue, TrackerError, ValidationError,
};

use crate::store::{IssueDraft, UserDirectory};

/// Decide the initial state of a new issue.
///
/// Unassigned issues start `PENDING`; issues created with a known user start
/// `IN_PROGRESS`.
pub fn decide_create<D>(request: &NewIssue, users: &D) -> Result<IssueDraft, TrackerError>
where
    D: UserDirectory + ?Sized,
{
    if request.title.is_empty() {
        return Err(ValidationError::EmptyField("title").into());
    }
    if request.description.is_empty() {
        return Err(ValidationError::EmptyField("description").into());
    }

    let (status, assignee) = match request.requested_assignee() {
        None => (IssueStatus::Pending, None),
        Some(id) => {
            let user = users
                .user(id)
                .ok_or(ValidationError::UnknownUser(id.get()))?;
            (IssueStatus::InProgress, Some(user))
        }
    };

    Ok(IssueDraft {
        id: None,
        title: request.title.clone(),
        description: request.description.clone(),
        status,
        assignee,
    })
}

/// Decide the state of `current` after applying `patch`.
///
/// The returned issue still carries the old `updated_at`; the store stamps
/// it when the result is written.
pub fn decide_update<D>(
    current: &Issue,
    patch: &IssuePatch,
    users: &D,
) -> Result<Issue, TrackerError>
where
    D: UserDirectory + ?Sized,
{
    if current.is_terminal() {
        return Err(TrackerError::Forbidden {
            id: current.id,
            status: current.status,
        });
    }

    let mut next = current.clone();

    if let Some(title) = &patch.title {
        next.title = title.clone();
    }
    if let Some(description) = &patch.description {
        next.description = description.clone();
    }

    let cleared = match patch.assignee {
        AssigneeChange::Keep => false,
        AssigneeChange::Clear => {
            next.assignee = None;
            next.status = IssueStatus::Pending;
            true
        }
        AssigneeChange::Assign(id) => {
            let user = users
                .user(id)
                .ok_or(ValidationError::UnknownUser(id.get()))?;
            next.assignee = Some(user);
            if next.status == IssueStatus::Pending && patch.status.is_none() {
                next.status = IssueStatus::InProgress;
            }
            false
        }
    };

    if let Some(raw) = &patch.status {
        let requested =
            IssueStatus::parse(raw).ok_or_else(|| ValidationError::UnknownStatus(raw.clone()))?;
        // The clear path has already pinned PENDING.
        if !cleared {
            if requested.requires_assignee() && next.assignee.is_none() {
                return Err(ValidationError::AssigneeRequired(requested).into());
            }
            next.status = requested;
        }
    }

    Ok(next)
}
