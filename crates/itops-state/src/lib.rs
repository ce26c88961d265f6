//! # itops-state: Issue Lifecycle and Storage
//!
//! ## Components
//!
//! - **Store** (`store.rs`): the [`IssueStore`] capability and its
//!   in-memory implementation [`MemoryStore`]. Sole authority for issue ID
//!   allocation. No business validation.
//!
//! - **Lifecycle** (`lifecycle.rs`): pure decision functions for creating
//!   and partially updating issues. Statuses that require an assignee are
//!   guarded, terminal statuses freeze the issue, and clearing the assignee
//!   resets the issue to `PENDING`.
//!
//! - **Tracker** (`tracker.rs`): [`IssueTracker`], which runs the lifecycle
//!   decisions against a store atomically and logs each accepted change.
//!
//! - **Seed** (`seed.rs`): the fixed user directory and demo issues.
//!
//! ## Concurrency
//!
//! The store serializes all issue access behind one `parking_lot::RwLock`.
//! Updates run read-decide-write inside the write lock, so two concurrent
//! updates to the same issue never lose each other's changes and two
//! creates never receive the same ID. The lifecycle functions are
//! stateless.

pub mod lifecycle;
pub mod seed;
pub mod store;
pub mod tracker;

pub use lifecycle::{decide_create, decide_update};
pub use seed::{default_users, demo_issues};
pub use store::{IssueDraft, IssueStore, MemoryStore, UserDirectory};
pub use tracker::IssueTracker;
