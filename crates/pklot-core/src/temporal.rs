//! # Temporal Types: UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC timestamp truncated to seconds precision.
//! Ticket issuance, redemption, and stay durations are all expressed in
//! this type, so fee arithmetic never sees a timezone offset.
//!
//! Non-UTC textual inputs are **rejected at construction**: there is no
//! silent conversion that could shift a stay across an hour boundary.

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PklotError;

const SECONDS_PER_HOUR: i64 = 3600;

/// A UTC-only timestamp, truncated to seconds.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`]: from an RFC 3339 string with a `Z` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// **Rejects non-UTC inputs.** Only the `Z` suffix is accepted; explicit
    /// offsets, even `+00:00`, are refused.
    ///
    /// # Errors
    ///
    /// Returns [`PklotError::InvalidArgument`] if the string is not valid
    /// RFC 3339 or does not end in `Z`.
    pub fn parse(s: &str) -> Result<Self, PklotError> {
        if !s.ends_with('Z') {
            return Err(PklotError::InvalidArgument(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }

        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            PklotError::InvalidArgument(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;

        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, PklotError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
            PklotError::InvalidArgument(format!("invalid Unix timestamp: {secs}"))
        })?;
        Ok(Self(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Shift by `delta`, or `None` if the result leaves chrono's range.
    pub fn checked_add(&self, delta: TimeDelta) -> Option<Self> {
        self.0
            .checked_add_signed(delta)
            .map(|dt| Self(truncate_to_seconds(dt)))
    }

    /// Whole hours elapsed from `earlier` to `self`, rounded down.
    ///
    /// An `earlier` that is actually later than `self` yields 0.
    pub fn whole_hours_since(&self, earlier: &Timestamp) -> u64 {
        let secs = self.epoch_secs().saturating_sub(earlier.epoch_secs());
        if secs <= 0 {
            0
        } else {
            (secs / SECONDS_PER_HOUR) as u64
        }
    }

    /// Render as ISO8601 with Z suffix (e.g., `2025-05-17T10:30:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
