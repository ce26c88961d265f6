//! # Seed Data
//!
//! The fixed user directory and an optional set of demo issues loaded at
//! startup. Demo issues carry historical timestamps relative to `now`.

use chrono::{DateTime, Duration, Utc};
use itops_core::{Issue, IssueId, IssueStatus, Timestamp, User, UserId};

use crate::store::MemoryStore;

/// The users every deployment starts with.
pub fn default_users() -> Vec<User> {
    [(1, "Alice Kim"), (2, "Ben Lee"), (3, "Chloe Park")]
        .into_iter()
        .filter_map(|(id, name)| UserId::new(id).map(|id| User::new(id, name)))
        .collect()
}

struct DemoIssue {
    title: &'static str,
    description: &'static str,
    status: IssueStatus,
    assignee: Option<u64>,
    created_days_ago: i64,
    updated_days_ago: i64,
}

const DEMO_ISSUES: [DemoIssue; 5] = [
    DemoIssue {
        title: "Fix intermittent login failure",
        description: "Resolve the sporadic error users hit while signing in",
        status: IssueStatus::InProgress,
        assignee: Some(1),
        created_days_ago: 5,
        updated_days_ago: 5,
    },
    DemoIssue {
        title: "Improve main page UI",
        description: "Rework the main page layout so it is easier to navigate",
        status: IssueStatus::Pending,
        assignee: None,
        created_days_ago: 3,
        updated_days_ago: 3,
    },
    DemoIssue {
        title: "Optimize database queries",
        description: "Fix the slowdown on queries over large result sets",
        status: IssueStatus::Completed,
        assignee: Some(3),
        created_days_ago: 7,
        updated_days_ago: 2,
    },
    DemoIssue {
        title: "Add mobile push notifications",
        description: "The mobile app needs push notification support",
        status: IssueStatus::Pending,
        assignee: Some(2),
        created_days_ago: 1,
        updated_days_ago: 1,
    },
    DemoIssue {
        title: "Refactor legacy code",
        description: "Bring the old code base up to current conventions",
        status: IssueStatus::InProgress,
        assignee: Some(1),
        created_days_ago: 10,
        updated_days_ago: 8,
    },
];

/// Build the demo issues against `users`, numbered from 1.
///
/// Assignees missing from `users` are dropped, and an issue that would then
/// need an assignee falls back to `PENDING`.
pub fn demo_issues(users: &[User], now: DateTime<Utc>) -> Vec<Issue> {
    DEMO_ISSUES
        .iter()
        .zip(1u64..)
        .map(|(demo, id)| {
            let assignee = demo
                .assignee
                .and_then(|raw| users.iter().find(|u| u.id.get() == raw))
                .cloned();
            let status = if demo.status.requires_assignee() && assignee.is_none() {
                IssueStatus::Pending
            } else {
                demo.status
            };
            Issue {
                id: IssueId(id),
                title: demo.title.to_string(),
                description: demo.description.to_string(),
                status,
                assignee,
                created_at: Timestamp::from_utc(now - Duration::days(demo.created_days_ago)),
                updated_at: Timestamp::from_utc(now - Duration::days(demo.updated_days_ago)),
            }
        })
        .collect()
}

impl MemoryStore {
    /// Store preloaded with [`default_users`] and [`demo_issues`].
    pub fn with_demo_data() -> Self {
        let users = default_users();
        let store = MemoryStore::new(users.clone());
        for issue in demo_issues(&users, Utc::now()) {
            store.seed_issue(issue);
        }
        store
    }
}
