//! Timestamp type used throughout the dashboard.
//!
//! The service emits RFC 3339 strings (UTC). All elapsed-time math is done
//! in whole seconds.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AncrError;

/// A UTC timestamp, serialized as an RFC 3339 string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build a timestamp from Unix epoch seconds.
    ///
    /// Returns `None` for values outside chrono's representable range.
    pub fn from_unix(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Parse an RFC 3339 string.
    pub fn parse(s: &str) -> Result<Self, AncrError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| AncrError::InvalidTimestamp(format!("{s}: {e}")))
    }

    pub fn as_unix(&self) -> i64 {
        self.0.timestamp()
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    ///
    /// Saturates at zero for timestamps in the future.
    pub fn elapsed_secs(&self, now: Timestamp) -> u64 {
        (now.0 - self.0).num_seconds().max(0) as u64
    }

    /// Calendar date (`YYYY-MM-DD`) of this timestamp, UTC.
    pub fn date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        let ts = Timestamp::parse("2025-03-01T12:30:00Z").unwrap();
        assert_eq!(ts.to_string(), "2025-03-01T12:30:00Z");
    }

    #[test]
    fn parse_with_offset_normalizes_to_utc() {
        let ts = Timestamp::parse("2025-03-01T14:30:00+02:00").unwrap();
        assert_eq!(ts.to_string(), "2025-03-01T12:30:00Z");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn elapsed_saturates_for_future_timestamps() {
        let earlier = Timestamp::from_unix(1_000).unwrap();
        let later = Timestamp::from_unix(1_060).unwrap();
        assert_eq!(earlier.elapsed_secs(later), 60);
        assert_eq!(later.elapsed_secs(earlier), 0);
    }

    #[test]
    fn date_string_is_calendar_date() {
        let ts = Timestamp::parse("2025-03-01T23:59:59Z").unwrap();
        assert_eq!(ts.date_string(), "2025-03-01");
    }

    #[test]
    fn serde_transparent_string() {
        let ts = Timestamp::parse("2025-03-01T12:30:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }
}
