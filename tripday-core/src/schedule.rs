//! Slot suggestion and greedy auto-scheduling for a single day.
//!
//! Both operations are total: malformed times are dropped or treated as
//! "no preference", and the scheduler happily runs past the end of the day.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::{
    BUFFER_MINUTES, DEFAULT_DAY_END, DEFAULT_DAY_START, DEFAULT_DURATION_MINUTES, MAX_SUGGESTIONS,
};
use crate::interval::TimeInterval;
use crate::time::{ClockTime, parse_stored_time, parse_time};

/// Knobs for one scheduling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    pub day_start: ClockTime,
    pub day_end: ClockTime,
    pub buffer_minutes: u32,
    pub default_duration_minutes: u32,
    pub max_suggestions: usize,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        ScheduleOptions {
            day_start: parse_time(DEFAULT_DAY_START).unwrap_or(ClockTime::from_minutes(8 * 60)),
            day_end: parse_time(DEFAULT_DAY_END).unwrap_or(ClockTime::from_minutes(22 * 60)),
            buffer_minutes: BUFFER_MINUTES,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

/// An activity as the scheduler sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub id: String,
    /// Preferred start as `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

/// A window handed back to the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
}

impl Assignment {
    pub fn interval(&self) -> Option<TimeInterval> {
        TimeInterval::parse_stored(Some(&self.start_time), Some(&self.end_time))
    }
}

/// Propose start times for an activity of `duration` minutes inside
/// `[day_start, day_end]` that avoid every `occupied` interval.
///
/// A candidate that ends exactly where an occupied interval begins fits.
/// Empty or inverted occupied intervals are ignored. At most
/// `MAX_SUGGESTIONS` candidates are returned, earliest first.
pub fn suggest_slots(
    day_start: ClockTime,
    day_end: ClockTime,
    duration: u32,
    occupied: &[TimeInterval],
) -> Vec<ClockTime> {
    suggest_slots_limited(day_start, day_end, duration, occupied, MAX_SUGGESTIONS)
}

/// [`suggest_slots`] with an explicit cap on the number of candidates.
pub fn suggest_slots_limited(
    day_start: ClockTime,
    day_end: ClockTime,
    duration: u32,
    occupied: &[TimeInterval],
    limit: usize,
) -> Vec<ClockTime> {
    let mut busy: Vec<&TimeInterval> = occupied.iter().filter(|iv| !iv.is_empty()).collect();
    busy.sort_by_key(|iv| iv.start);

    let mut candidates = Vec::new();
    let mut cursor = day_start;

    for iv in busy {
        let gap_end = iv.start.min(day_end);
        if gap_end > cursor && cursor.minutes_until(gap_end) >= duration {
            trace!(%cursor, %gap_end, "gap fits");
            candidates.push(cursor);
        }
        cursor = cursor.max(iv.end);
    }

    if cursor <= day_end && cursor.minutes_until(day_end) >= duration {
        candidates.push(cursor);
    }

    candidates.truncate(limit);
    candidates
}

/// Slot suggestion over stored `HH:MM` bounds, as the planner keeps them.
/// Occupied entries with missing or malformed bounds are skipped silently.
pub fn suggest_slot_times(
    options: &ScheduleOptions,
    duration: u32,
    occupied: &[(Option<&str>, Option<&str>)],
) -> Vec<ClockTime> {
    let intervals: Vec<TimeInterval> = occupied
        .iter()
        .filter_map(|(start, end)| TimeInterval::parse_stored(*start, *end))
        .collect();

    suggest_slots_limited(
        options.day_start,
        options.day_end,
        duration,
        &intervals,
        options.max_suggestions,
    )
}

struct Pending<'a> {
    id: &'a str,
    preferred: Option<ClockTime>,
    duration: u32,
}

/// Placement order: pinned activities first (earliest pin first), then
/// unpinned ones longest first. `sort_by` is stable so ties keep input order.
fn placement_order(a: &Pending<'_>, b: &Pending<'_>) -> Ordering {
    match (a.preferred, b.preferred) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.duration.cmp(&a.duration),
    }
}

/// Assign every request a non-overlapping window, greedily.
///
/// The effective start is `max(cursor, preferred)`, so a preferred time is a
/// lower bound rather than a promise. The cursor moves to `end + buffer`
/// after each placement. Assignments come back in placement order.
pub fn auto_schedule(requests: &[ScheduleRequest], options: &ScheduleOptions) -> Vec<Assignment> {
    let mut pending: Vec<Pending<'_>> = requests
        .iter()
        .map(|r| Pending {
            id: &r.id,
            preferred: r.start_time.as_deref().and_then(parse_stored_time),
            duration: r.duration_minutes.unwrap_or(options.default_duration_minutes),
        })
        .collect();
    pending.sort_by(placement_order);

    let mut cursor = options.day_start;
    let mut assignments = Vec::with_capacity(pending.len());

    for p in pending {
        let start = cursor.max(p.preferred.unwrap_or(cursor));
        let end = start + p.duration;
        assignments.push(Assignment {
            id: p.id.to_string(),
            start_time: start.format(),
            end_time: end.format(),
        });
        cursor = end + options.buffer_minutes;
    }

    if cursor > options.day_end + options.buffer_minutes {
        debug!(
            day_end = %options.day_end,
            last_end = %assignments.last().map(|a| a.end_time.as_str()).unwrap_or(""),
            "auto-schedule runs past the end of the day"
        );
    }
    debug!(count = assignments.len(), "auto-scheduled activities");

    assignments
}
