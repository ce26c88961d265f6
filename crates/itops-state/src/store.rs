//! # Issue Storage
//!
//! [`IssueStore`] is the storage capability the tracker is written against:
//! create/get/list/update over issues plus lookups over users. It performs
//! no business validation.
//!
//! [`MemoryStore`] is the in-process implementation. Issues live in a
//! `BTreeMap` behind a `parking_lot::RwLock`; users live in an immutable map
//! that is never locked. All methods are synchronous and never hold the lock
//! across an `.await`.

use std::collections::BTreeMap;
use std::sync::Arc;

use itops_core::{Issue, IssueId, IssueStatus, Timestamp, TrackerError, User, UserId};
use parking_lot::RwLock;

/// Read-only lookup of users.
pub trait UserDirectory: Send + Sync {
    /// Look up a user. Absence is not an error.
    fn user(&self, id: UserId) -> Option<User>;

    /// All users, ascending by ID.
    fn users(&self) -> Vec<User>;
}

/// Fields of an issue before the store has accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    /// Explicit ID. `None` lets the store allocate the next one.
    pub id: Option<IssueId>,
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub assignee: Option<User>,
}

/// Storage capability over issues and users.
///
/// Every method is atomic with respect to every other method on the same
/// store.
pub trait IssueStore: UserDirectory {
    /// Store a new issue, allocating an ID when the draft has none and
    /// stamping `created_at`/`updated_at` with the current time.
    fn create_issue(&self, draft: IssueDraft) -> Result<Issue, TrackerError>;

    /// All issues, or only those in `filter`, ascending by ID.
    fn issues(&self, filter: Option<IssueStatus>) -> Vec<Issue>;

    /// Fetch one issue.
    fn issue(&self, id: IssueId) -> Result<Issue, TrackerError>;

    /// Replace a stored issue wholesale and stamp a fresh `updated_at`.
    ///
    /// `created_at` is preserved from the stored record.
    fn update_issue(&self, issue: Issue) -> Result<Issue, TrackerError>;

    /// Read, decide and write one issue under a single exclusive lock.
    ///
    /// `decide` receives the current record and returns the replacement
    /// or a rejection. On rejection nothing is written. `decide` may consult
    /// the [`UserDirectory`] of this store but must not call any other
    /// `IssueStore` method.
    fn modify_issue(
        &self,
        id: IssueId,
        decide: &mut dyn FnMut(&Issue) -> Result<Issue, TrackerError>,
    ) -> Result<Issue, TrackerError>;

    /// The ID the next draft without an explicit ID will receive.
    fn next_issue_id(&self) -> IssueId;

    /// Number of stored issues.
    fn issue_count(&self) -> usize {
        self.issues(None).len()
    }
}

// -- In-memory implementation -------------------------------------------------

#[derive(Debug)]
struct IssueTable {
    records: BTreeMap<IssueId, Issue>,
    next_id: IssueId,
}

impl IssueTable {
    /// Move `next_id` past `id` so it is never handed out again.
    fn reserve(&mut self, id: IssueId) {
        if id >= self.next_id {
            self.next_id = id.next();
        }
    }

    /// Write `issue` over the stored record for the same ID, keeping the
    /// original `created_at` and stamping `updated_at`.
    fn commit(&mut self, mut issue: Issue) -> Result<Issue, TrackerError> {
        let stored = self
            .records
            .get_mut(&issue.id)
            .ok_or(TrackerError::NotFound(issue.id))?;
        issue.created_at = stored.created_at;
        issue.updated_at = Timestamp::after(stored.updated_at);
        *stored = issue.clone();
        Ok(issue)
    }
}

/// Thread-safe, cloneable in-memory store. Clones share the same data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    issues: Arc<RwLock<IssueTable>>,
    users: Arc<BTreeMap<UserId, User>>,
}

impl MemoryStore {
    /// Create an empty store with the given user directory.
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            issues: Arc::new(RwLock::new(IssueTable {
                records: BTreeMap::new(),
                next_id: IssueId::FIRST,
            })),
            users: Arc::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    /// Insert a fully formed issue, keeping its own timestamps.
    ///
    /// Used to preload records that predate the process. Replaces any
    /// record with the same ID and moves the ID allocator past it.
    pub fn seed_issue(&self, issue: Issue) {
        let mut table = self.issues.write();
        table.reserve(issue.id);
        table.records.insert(issue.id, issue);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl UserDirectory for MemoryStore {
    fn user(&self, id: UserId) -> Option<User> {
        self.users.get(&id).cloned()
    }

    fn users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }
}

impl IssueStore for MemoryStore {
    fn create_issue(&self, draft: IssueDraft) -> Result<Issue, TrackerError> {
        let mut table = self.issues.write();
        let id = draft.id.unwrap_or(table.next_id);
        if table.records.contains_key(&id) {
            return Err(TrackerError::Internal(format!("issue {id} already exists")));
        }
        table.reserve(id);

        let now = Timestamp::now();
        let issue = Issue {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            assignee: draft.assignee,
            created_at: now,
            updated_at: now,
        };
        table.records.insert(id, issue.clone());
        Ok(issue)
    }

    fn issues(&self, filter: Option<IssueStatus>) -> Vec<Issue> {
        self.issues
            .read()
            .records
            .values()
            .filter(|issue| filter.map_or(true, |status| issue.status == status))
            .cloned()
            .collect()
    }

    fn issue(&self, id: IssueId) -> Result<Issue, TrackerError> {
        self.issues
            .read()
            .records
            .get(&id)
            .cloned()
            .ok_or(TrackerError::NotFound(id))
    }

    fn update_issue(&self, issue: Issue) -> Result<Issue, TrackerError> {
        self.issues.write().commit(issue)
    }

    fn modify_issue(
        &self,
        id: IssueId,
        decide: &mut dyn FnMut(&Issue) -> Result<Issue, TrackerError>,
    ) -> Result<Issue, TrackerError> {
        let mut table = self.issues.write();
        let current = table.records.get(&id).ok_or(TrackerError::NotFound(id))?;
        let mut next = decide(current)?;
        next.id = id;
        table.commit(next)
    }

    fn next_issue_id(&self) -> IssueId {
        self.issues.read().next_id
    }

    fn issue_count(&self) -> usize {
        self.issues.read().records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str) -> User {
        User::new(UserId::new(id).unwrap(), name)
    }

    fn store() -> MemoryStore {
        MemoryStore::new(vec![user(1, "alice"), user(2, "bob")])
    }

    fn draft(title: &str) -> IssueDraft {
        IssueDraft {
            id: None,
            title: title.to_string(),
            description: "desc".to_string(),
            status: IssueStatus::Pending,
            assignee: None,
        }
    }

    #[test]
    fn new_store_starts_at_first_id() {
        let store = store();
        assert_eq!(store.next_issue_id(), IssueId(1));
        assert_eq!(store.issue_count(), 0);
    }

    #[test]
    fn create_allocates_sequential_ids() {
        let store = store();
        let a = store.create_issue(draft("a")).unwrap();
        let b = store.create_issue(draft("b")).unwrap();
        assert_eq!(a.id, IssueId(1));
        assert_eq!(b.id, IssueId(2));
        assert_eq!(store.next_issue_id(), IssueId(3));
    }

    #[test]
    fn create_stamps_equal_timestamps() {
        let issue = store().create_issue(draft("a")).unwrap();
        assert_eq!(issue.created_at, issue.updated_at);
    }

    #[test]
    fn create_with_explicit_id_moves_allocator_past_it() {
        let store = store();
        let mut d = draft("explicit");
        d.id = Some(IssueId(10));
        let issue = store.create_issue(d).unwrap();
        assert_eq!(issue.id, IssueId(10));
        assert_eq!(store.next_issue_id(), IssueId(11));
        assert_eq!(store.create_issue(draft("next")).unwrap().id, IssueId(11));
    }

    #[test]
    fn create_with_low_explicit_id_keeps_allocator() {
        let store = store();
        store.create_issue(draft("a")).unwrap();
        store.create_issue(draft("b")).unwrap();
        let mut d = draft("gap");
        d.id = Some(IssueId(100));
        store.create_issue(d).unwrap();
        let mut d = draft("low");
        d.id = Some(IssueId(50));
        store.create_issue(d).unwrap();
        assert_eq!(store.next_issue_id(), IssueId(101));
    }

    #[test]
    fn create_rejects_duplicate_explicit_id() {
        let store = store();
        store.create_issue(draft("a")).unwrap();
        let mut d = draft("dup");
        d.id = Some(IssueId(1));
        let err = store.create_issue(d).unwrap_err();
        assert!(matches!(err, TrackerError::Internal(_)));
        assert_eq!(store.issue(IssueId(1)).unwrap().title, "a");
    }

    #[test]
    fn issues_filters_by_status_in_id_order() {
        let store = store();
        store.create_issue(draft("a")).unwrap();
        let mut cancelled = draft("b");
        cancelled.status = IssueStatus::Cancelled;
        store.create_issue(cancelled).unwrap();
        store.create_issue(draft("c")).unwrap();

        let all: Vec<_> = store.issues(None).into_iter().map(|i| i.id).collect();
        assert_eq!(all, vec![IssueId(1), IssueId(2), IssueId(3)]);

        let pending: Vec<_> = store
            .issues(Some(IssueStatus::Pending))
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(pending, vec!["a", "c"]);
        assert!(store.issues(Some(IssueStatus::Completed)).is_empty());
    }

    #[test]
    fn issue_missing_is_not_found() {
        assert_eq!(
            store().issue(IssueId(5)).unwrap_err(),
            TrackerError::NotFound(IssueId(5))
        );
    }

    #[test]
    fn update_replaces_record_and_keeps_created_at() {
        let store = store();
        let original = store.create_issue(draft("a")).unwrap();
        let mut changed = original.clone();
        changed.title = "renamed".into();
        changed.created_at = Timestamp::from_utc(chrono::Utc::now() + chrono::Duration::days(1));

        let updated = store.update_issue(changed).unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(store.issue(original.id).unwrap(), updated);
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = store();
        let mut ghost = store.create_issue(draft("a")).unwrap();
        ghost.id = IssueId(99);
        assert_eq!(
            store.update_issue(ghost).unwrap_err(),
            TrackerError::NotFound(IssueId(99))
        );
    }

    #[test]
    fn modify_rejection_leaves_record_untouched() {
        let store = store();
        let original = store.create_issue(draft("a")).unwrap();
        let err = store
            .modify_issue(original.id, &mut |_| {
                Err(TrackerError::Internal("nope".into()))
            })
            .unwrap_err();
        assert_eq!(err, TrackerError::Internal("nope".into()));
        assert_eq!(store.issue(original.id).unwrap(), original);
    }

    #[test]
    fn modify_cannot_change_the_id() {
        let store = store();
        let original = store.create_issue(draft("a")).unwrap();
        let updated = store
            .modify_issue(original.id, &mut |current| {
                let mut next = current.clone();
                next.id = IssueId(42);
                next.title = "b".into();
                Ok(next)
            })
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(store.issue_count(), 1);
    }

    #[test]
    fn user_lookup_reports_presence() {
        let store = store();
        assert_eq!(store.user(UserId::new(2).unwrap()).unwrap().name, "bob");
        assert!(store.user(UserId::new(9).unwrap()).is_none());
        let names: Vec<_> = store.users().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn seed_issue_keeps_timestamps_and_reserves_id() {
        let store = store();
        let past = Timestamp::from_utc(chrono::Utc::now() - chrono::Duration::days(4));
        store.seed_issue(Issue {
            id: IssueId(3),
            title: "old".into(),
            description: "d".into(),
            status: IssueStatus::Pending,
            assignee: None,
            created_at: past,
            updated_at: past,
        });
        assert_eq!(store.issue(IssueId(3)).unwrap().created_at, past);
        assert_eq!(store.next_issue_id(), IssueId(4));
    }

    #[test]
    fn clones_share_data() {
        let store = store();
        let clone = store.clone();
        clone.create_issue(draft("shared")).unwrap();
        assert_eq!(store.issue_count(), 1);
    }

    #[test]
    fn concurrent_creates_never_share_an_id() {
        let store = store();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|_| store.create_issue(draft("t")).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let mut ids: Vec<IssueId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 400);
        assert_eq!(store.next_issue_id(), IssueId(401));
    }
}
