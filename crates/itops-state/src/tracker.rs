//! # Issue Tracker Service
//!
//! Binds the lifecycle rules to an injected [`IssueStore`]. This is the
//! surface the HTTP layer calls: plain data in, issues or a
//! [`TrackerError`] out.

use std::sync::Arc;

use itops_core::{
    Issue, IssueId, IssuePatch, IssueStatus, NewIssue, TrackerError, User, UserId,
    ValidationError,
};

use crate::lifecycle::{decide_create, decide_update};
use crate::store::{IssueStore, MemoryStore};

/// Issue lifecycle operations over a shared store.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct IssueTracker {
    store: Arc<dyn IssueStore>,
}

impl std::fmt::Debug for IssueTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueTracker")
            .field("issues", &self.store.issue_count())
            .field("next_issue_id", &self.store.next_issue_id())
            .finish()
    }
}

impl IssueTracker {
    /// Wrap an existing store.
    pub fn new(store: Arc<dyn IssueStore>) -> Self {
        Self { store }
    }

    /// Tracker over a fresh in-memory store with the given users.
    pub fn in_memory(users: impl IntoIterator<Item = User>) -> Self {
        Self::new(Arc::new(MemoryStore::new(users)))
    }

    /// Create an issue. Nothing is stored when the request is rejected.
    pub fn create_issue(&self, request: NewIssue) -> Result<Issue, TrackerError> {
        let draft = decide_create(&request, self.store.as_ref()).map_err(|err| {
            tracing::debug!(error = %err, "issue creation rejected");
            err
        })?;
        let issue = self.store.create_issue(draft)?;
        tracing::info!(
            issue_id = %issue.id,
            status = %issue.status,
            assignee = ?issue.assignee_id().map(UserId::get),
            "issue created"
        );
        Ok(issue)
    }

    /// List issues, optionally filtered by a status in wire form.
    ///
    /// An absent or empty filter lists everything.
    pub fn issues(&self, status_filter: Option<&str>) -> Result<Vec<Issue>, TrackerError> {
        let filter = match status_filter {
            None | Some("") => None,
            Some(raw) => Some(
                IssueStatus::parse(raw)
                    .ok_or_else(|| ValidationError::UnknownStatus(raw.to_string()))?,
            ),
        };
        Ok(self.store.issues(filter))
    }

    /// Fetch a single issue.
    pub fn issue(&self, id: IssueId) -> Result<Issue, TrackerError> {
        self.store.issue(id)
    }

    /// Apply a partial update atomically.
    pub fn update_issue(&self, id: IssueId, patch: IssuePatch) -> Result<Issue, TrackerError> {
        let store = self.store.as_ref();
        let mut previous = None;
        let result = store.modify_issue(id, &mut |current| {
            previous = Some(current.status);
            decide_update(current, &patch, store)
        });

        match &result {
            Ok(issue) => tracing::info!(
                issue_id = %id,
                from = ?previous,
                to = %issue.status,
                assignee = ?issue.assignee_id().map(UserId::get),
                "issue updated"
            ),
            Err(err) => tracing::debug!(issue_id = %id, error = %err, "issue update rejected"),
        }
        result
    }

    /// All users, ascending by ID.
    pub fn users(&self) -> Vec<User> {
        self.store.users()
    }

    /// The ID the next created issue will receive.
    pub fn next_issue_id(&self) -> IssueId {
        self.store.next_issue_id()
    }

    /// Number of issues per status, in [`IssueStatus::ALL`] order.
    pub fn status_counts(&self) -> [(IssueStatus, usize); 4] {
        let issues = self.store.issues(None);
        IssueStatus::ALL.map(|status| {
            let count = issues.iter().filter(|i| i.status == status).count();
            (status, count)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itops_core::AssigneeChange;

    fn tracker() -> IssueTracker {
        IssueTracker::in_memory(vec![
            User::new(UserId::new(1).unwrap(), "alice"),
            User::new(UserId::new(2).unwrap(), "bob"),
        ])
    }

    #[test]
    fn documented_scenario() {
        let tracker = tracker();
        let created = tracker
            .create_issue(NewIssue::new("Fix bug", "...").assigned_to(1))
            .unwrap();
        assert_eq!(created.status, IssueStatus::InProgress);
        assert_eq!(created.assignee_id(), UserId::new(1));

        let cleared = tracker
            .update_issue(
                created.id,
                IssuePatch::default().assignee(AssigneeChange::Clear),
            )
            .unwrap();
        assert_eq!(cleared.status, IssueStatus::Pending);
        assert!(cleared.assignee.is_none());

        let err = tracker
            .update_issue(created.id, IssuePatch::default().status("COMPLETED"))
            .unwrap_err();
        assert_eq!(
            err,
            TrackerError::Validation(ValidationError::AssigneeRequired(IssueStatus::Completed))
        );
    }

    #[test]
    fn rejected_create_stores_nothing_and_keeps_next_id() {
        let tracker = tracker();
        tracker.create_issue(NewIssue::new("a", "b")).unwrap();
        let before = tracker.next_issue_id();
        assert!(tracker
            .create_issue(NewIssue::new("a", "b").assigned_to(99))
            .is_err());
        assert_eq!(tracker.issues(None).unwrap().len(), 1);
        assert_eq!(tracker.next_issue_id(), before);
        assert_eq!(tracker.create_issue(NewIssue::new("c", "d")).unwrap().id, before);
    }

    #[test]
    fn update_stamps_updated_at_only_on_success() {
        let tracker = tracker();
        let created = tracker.create_issue(NewIssue::new("a", "b")).unwrap();

        tracker
            .update_issue(created.id, IssuePatch::default().status("COMPLETED"))
            .unwrap_err();
        assert_eq!(tracker.issue(created.id).unwrap(), created);

        let updated = tracker
            .update_issue(created.id, IssuePatch::default().title("renamed"))
            .unwrap();
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_unknown_issue_is_not_found() {
        let err = tracker()
            .update_issue(IssueId(3), IssuePatch::default().title("x"))
            .unwrap_err();
        assert_eq!(err, TrackerError::NotFound(IssueId(3)));
    }

    #[test]
    fn completed_issue_is_frozen() {
        let tracker = tracker();
        let created = tracker
            .create_issue(NewIssue::new("a", "b").assigned_to(2))
            .unwrap();
        let done = tracker
            .update_issue(created.id, IssuePatch::default().status("COMPLETED"))
            .unwrap();
        let err = tracker
            .update_issue(created.id, IssuePatch::default().title("late edit"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::Forbidden { .. }));
        assert_eq!(tracker.issue(created.id).unwrap(), done);
    }

    #[test]
    fn list_filter_parses_wire_status() {
        let tracker = tracker();
        tracker.create_issue(NewIssue::new("a", "b")).unwrap();
        tracker
            .create_issue(NewIssue::new("c", "d").assigned_to(1))
            .unwrap();

        assert_eq!(tracker.issues(Some("")).unwrap().len(), 2);
        assert_eq!(tracker.issues(Some("PENDING")).unwrap().len(), 1);
        assert_eq!(tracker.issues(Some("IN_PROGRESS")).unwrap()[0].title, "c");
        assert_eq!(
            tracker.issues(Some("in_progress")).unwrap_err(),
            TrackerError::Validation(ValidationError::UnknownStatus("in_progress".into()))
        );
    }

    #[test]
    fn status_counts_cover_every_status() {
        let tracker = tracker();
        tracker.create_issue(NewIssue::new("a", "b")).unwrap();
        tracker
            .create_issue(NewIssue::new("c", "d").assigned_to(1))
            .unwrap();
        let counts = tracker.status_counts();
        assert_eq!(counts[0], (IssueStatus::Pending, 1));
        assert_eq!(counts[1], (IssueStatus::InProgress, 1));
        assert_eq!(counts[2], (IssueStatus::Completed, 0));
        assert_eq!(counts[3], (IssueStatus::Cancelled, 0));
    }

    #[test]
    fn concurrent_updates_are_serialized() {
        let tracker = tracker();
        let created = tracker.create_issue(NewIssue::new("a", "b")).unwrap();
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let tracker = tracker.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        let patch = if (n + i) % 2 == 0 {
                            IssuePatch::default().assignee(AssigneeChange::from_raw(1))
                        } else {
                            IssuePatch::default().assignee(AssigneeChange::Clear)
                        };
                        tracker.update_issue(created.id, patch).unwrap();
                        let seen = tracker.issue(created.id).unwrap();
                        assert!(seen.is_consistent());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(tracker.issue(created.id).unwrap().is_consistent());
    }
}
