//! # Identifier Newtypes
//!
//! Issue and user identifiers are distinct types so a user ID can never be
//! passed where an issue ID is expected.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Identifier of an issue.
///
/// Allocated by the store, starting at 1 and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(pub u64);

impl IssueId {
    /// The first identifier handed out by an empty store.
    pub const FIRST: IssueId = IssueId(1);

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The identifier that follows this one.
    pub fn next(self) -> IssueId {
        IssueId(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a user.
///
/// Always non-zero. The value `0` is reserved on the wire as the
/// "no assignee" sentinel and is rejected by [`UserId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(NonZeroU64);

impl UserId {
    /// Wrap a raw identifier, returning `None` for the zero sentinel.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_zero() {
        assert!(UserId::new(0).is_none());
        assert_eq!(UserId::new(7).map(UserId::get), Some(7));
    }

    #[test]
    fn issue_id_next_increments() {
        assert_eq!(IssueId::FIRST.next(), IssueId(2));
        assert_eq!(IssueId(u64::MAX).next(), IssueId(u64::MAX));
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&IssueId(42)).unwrap(), "42");
        let user = UserId::new(3).unwrap();
        assert_eq!(serde_json::to_string(&user).unwrap(), "3");
        let parsed: UserId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, user);
    }

    #[test]
    fn user_id_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<UserId>("0").is_err());
    }
}
