//! Wall-clock times and duration helpers.
//!
//! Times are plain minutes since midnight with no timezone attached. Parsing
//! never fails loudly: anything that is not a valid `HH:MM` yields `None` and
//! callers treat it as "no constraint".
//!
//! Two parsers exist. [`parse_time`] is strict (hours 0-23) and is what user
//! input goes through. [`parse_stored_time`] also accepts hours past 23, the
//! way the scheduler writes times that run past midnight, and is used for
//! bounds read back from a plan.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day as minutes since midnight.
///
/// Values built by arithmetic may run past 23:59; they are not wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build from hours and minutes; `None` outside 00:00..=23:59.
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(ClockTime(hours * 60 + minutes))
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        ClockTime(minutes)
    }

    pub const fn minutes(self) -> u32 {
        self.0
    }

    pub fn parse(s: &str) -> Option<Self> {
        let (h, m) = split_hm(s, 2)?;
        Self::from_hm(h, m)
    }

    /// Like [`ClockTime::parse`] but hours may run past 23 (`"25:00"`).
    pub fn parse_stored(s: &str) -> Option<Self> {
        let (h, m) = split_hm(s, 3)?;
        if m > 59 {
            return None;
        }
        Some(ClockTime(h * 60 + m))
    }

    /// Minutes from `self` until `later`, zero if `later` is not after `self`.
    pub fn minutes_until(self, later: ClockTime) -> u32 {
        later.0.saturating_sub(self.0)
    }

    /// Whether this value is still inside the calendar day it started in.
    pub fn is_same_day(self) -> bool {
        self.0 < MINUTES_PER_DAY
    }

    /// Format as `HH:MM`. Hours keep counting past 23.
    pub fn format(self) -> String {
        self.to_string()
    }
}

fn split_hm(s: &str, max_hour_digits: usize) -> Option<(u32, u32)> {
    let (h, m) = s.trim().split_once(':')?;
    if h.is_empty() || h.len() > max_hour_digits || m.len() != 2 {
        return None;
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((h.parse().ok()?, m.parse().ok()?))
}

impl Add<u32> for ClockTime {
    type Output = ClockTime;

    fn add(self, minutes: u32) -> ClockTime {
        ClockTime(self.0.saturating_add(minutes))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClockTime::parse_stored(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{s}', expected HH:MM")))
    }
}

/// Parse `HH:MM`, `None` for anything else (including empty strings).
pub fn parse_time(s: &str) -> Option<ClockTime> {
    ClockTime::parse(s)
}

/// Parse a time read back from a plan; hours past 23 are kept.
pub fn parse_stored_time(s: &str) -> Option<ClockTime> {
    ClockTime::parse_stored(s)
}

/// Minutes between two stored `HH:MM` strings.
/// Zero when either side is unparseable or `end` is not after `start`.
pub fn duration_between(start: &str, end: &str) -> u32 {
    match (parse_stored_time(start), parse_stored_time(end)) {
        (Some(s), Some(e)) => s.minutes_until(e),
        _ => 0,
    }
}

/// Short human form: `45m`, `2h`, `1h 30m`.
pub fn format_duration(minutes: u32) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Parse a duration as bare minutes (`90`) or a humantime string (`1h 30m`).
/// Sub-minute remainders are dropped.
pub fn parse_duration(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(minutes) = s.parse::<u32>() {
        return Some(minutes);
    }
    let duration = humantime::parse_duration(s).ok()?;
    u32::try_from(duration.as_secs() / 60).ok()
}
