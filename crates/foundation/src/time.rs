//! Time primitives.
//!
//! `Time` is seconds since the Unix epoch (UTC). Entity timestamps arrive as
//! ISO-8601 strings and are converted once at ingestion.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Time(pub f64); // seconds

impl Time {
    /// Parses an ISO-8601 timestamp.
    ///
    /// Accepts RFC 3339 (`2019-08-03T10:15:00+02:00`, `...Z`), the space-separated
    /// form Python's `isoformat(" ")` emits, and offset-less timestamps, which are
    /// taken as UTC.
    pub fn parse_iso8601(s: &str) -> Option<Time> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::from_datetime(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Some(Self::from_datetime(dt.with_timezone(&Utc)));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self::from_datetime(naive.and_utc()));
            }
        }
        None
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Time {
        Time(dt.timestamp_micros() as f64 / 1_000_000.0)
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        DateTime::from_timestamp_micros((self.0 * 1_000_000.0).round() as i64)
    }

    /// RFC 3339 rendering in UTC, second precision.
    pub fn to_iso8601(self) -> Option<String> {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn seconds_since(self, earlier: Time) -> f64 {
        self.0 - earlier.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn instant(t: Time) -> Self {
        Self { start: t, end: t }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    pub fn contains(&self, t: Time) -> bool {
        t.0 >= self.start.0 && t.0 <= self.end.0
    }

    /// Smallest span covering both `self` and `t`.
    pub fn extend(self, t: Time) -> Self {
        Self {
            start: Time(self.start.0.min(t.0)),
            end: Time(self.end.0.max(t.0)),
        }
    }
}

/// Formats a duration as `1h 02m 03s`; durations under an hour drop the hour.
pub fn format_hms(duration_s: f64) -> String {
    let total = duration_s.max(0.0).round() as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else {
        format!("{m}m {s:02}s")
    }
}
