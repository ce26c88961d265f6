//! # itops-core: Foundational Types for the Issue Tracker
//!
//! Defines the plain-data vocabulary shared by the store, the lifecycle
//! rules and the HTTP layer. Depends on no other `itops-*` crate.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `IssueId` and `UserId` cannot be swapped for
//!    each other. `UserId` is non-zero: the wire-level `0` sentinel never
//!    reaches the domain as a user reference.
//!
//! 2. **Closed status set.** [`IssueStatus`] has exactly four variants; raw
//!    strings are parsed once at the boundary through [`IssueStatus::parse`].
//!
//! 3. **Tri-state assignment.** [`AssigneeChange`] separates "field not sent"
//!    from "clear the assignee" from "assign this user".
//!
//! 4. **Typed rejections.** Every business failure is a [`TrackerError`]
//!    variant; no transport types appear here.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod model;
pub mod patch;
pub mod status;
pub mod temporal;

pub use error::{TrackerError, ValidationError};
pub use identity::{IssueId, UserId};
pub use model::{Issue, User};
pub use patch::{AssigneeChange, IssuePatch, NewIssue};
pub use status::IssueStatus;
pub use temporal::Timestamp;
