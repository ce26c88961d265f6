//! # Timestamps
//!
//! `Timestamp` is a UTC instant. Unlike a wall-clock read, [`Timestamp::after`]
//! never goes backwards relative to a previous stamp, which keeps
//! `updatedAt >= createdAt` even if the system clock is stepped back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp, serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap an existing `DateTime<Utc>`.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Current UTC time, clamped so it is never earlier than `floor`.
    pub fn after(floor: Timestamp) -> Self {
        Self::now().max(floor)
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn after_never_precedes_floor() {
        let future = Timestamp::from_utc(Utc::now() + Duration::hours(1));
        assert_eq!(Timestamp::after(future), future);
    }

    #[test]
    fn after_uses_clock_when_floor_is_past() {
        let past = Timestamp::from_utc(Utc::now() - Duration::days(3));
        assert!(Timestamp::after(past) > past);
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.starts_with('"'));
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
