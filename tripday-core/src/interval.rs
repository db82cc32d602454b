//! Half-open time intervals and overlap checks.

use serde::{Deserialize, Serialize};

use crate::time::{ClockTime, parse_stored_time, parse_time};

/// A `[start, end)` window within one day.
///
/// An interval whose end is not after its start (overnight spans included)
/// is empty: it never overlaps anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeInterval {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        TimeInterval { start, end }
    }

    /// Parse optional `HH:MM` bounds. `None` if either bound is missing or malformed.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Option<Self> {
        Some(TimeInterval {
            start: parse_time(start?)?,
            end: parse_time(end?)?,
        })
    }

    /// Parse bounds read back from a plan, where an end such as `"25:00"`
    /// means the activity runs past midnight.
    pub fn parse_stored(start: Option<&str>, end: Option<&str>) -> Option<Self> {
        Some(TimeInterval {
            start: parse_stored_time(start?)?,
            end: parse_stored_time(end?)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.start < other.end && other.start < self.end
    }

    /// Size of the intersection in minutes, 0 when the intervals don't overlap.
    pub fn overlap_minutes(&self, other: &TimeInterval) -> u32 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        start.minutes_until(end)
    }
}

/// Whether `[start1, end1)` and `[start2, end2)` intersect.
/// Missing or malformed times mean no overlap.
pub fn overlaps(start1: &str, end1: &str, start2: &str, end2: &str) -> bool {
    match (
        TimeInterval::parse(Some(start1), Some(end1)),
        TimeInterval::parse(Some(start2), Some(end2)),
    ) {
        (Some(a), Some(b)) => a.overlaps(&b),
        _ => false,
    }
}

/// Overlap of two `HH:MM` intervals in minutes.
pub fn overlap_minutes(start1: &str, end1: &str, start2: &str, end2: &str) -> u32 {
    match (
        TimeInterval::parse(Some(start1), Some(end1)),
        TimeInterval::parse(Some(start2), Some(end2)),
    ) {
        (Some(a), Some(b)) => a.overlap_minutes(&b),
        _ => 0,
    }
}
