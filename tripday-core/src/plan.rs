//! Itinerary model: plans, days and activities.
//!
//! These are the records the planner persists. The scheduling functions only
//! ever see thin views of them (`ScheduleRequest`, `TimeInterval`), built here
//! and written back here.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::conflict::{Conflict, detect_conflicts};
use crate::error::{TripdayError, TripdayResult};
use crate::interval::TimeInterval;
use crate::schedule::{Assignment, ScheduleOptions, ScheduleRequest, auto_schedule, suggest_slot_times};
use crate::time::{ClockTime, duration_between, parse_stored_time};

/// A saved vacation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// IANA zone used when exporting (e.g. "Europe/Rome"); floating times if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub days: Vec<Day>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sightseeing,
    Food,
    Transport,
    Accommodation,
    Activity,
    Shopping,
    #[default]
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sightseeing => "Sightseeing",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Accommodation => "Accommodation",
            Category::Activity => "Activity",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Category::Sightseeing => "🏛",
            Category::Food => "🍽",
            Category::Transport => "🚆",
            Category::Accommodation => "🏨",
            Category::Activity => "🎯",
            Category::Shopping => "🛍",
            Category::Other => "📌",
        }
    }
}

impl Activity {
    pub fn new(title: impl Into<String>) -> Self {
        Activity {
            id: new_id(),
            title: title.into(),
            location: None,
            start_time: None,
            end_time: None,
            duration_minutes: None,
            cost: None,
            category: Category::default(),
            notes: None,
        }
    }

    pub fn start(&self) -> Option<ClockTime> {
        self.start_time.as_deref().and_then(parse_stored_time)
    }

    /// The scheduled window, if both bounds parse. Ends past `23:59` are kept.
    pub fn interval(&self) -> Option<TimeInterval> {
        TimeInterval::parse_stored(self.start_time.as_deref(), self.end_time.as_deref())
    }

    /// Explicit duration, else the span between start and end, else `default`.
    pub fn effective_duration(&self, default: u32) -> u32 {
        if let Some(minutes) = self.duration_minutes {
            return minutes;
        }
        match (self.start_time.as_deref(), self.end_time.as_deref()) {
            (Some(start), Some(end)) => match duration_between(start, end) {
                0 => default,
                minutes => minutes,
            },
            _ => default,
        }
    }

    /// The scheduler's view of this activity. The duration is resolved here
    /// so a stored start/end span survives rescheduling.
    pub fn schedule_request(&self, default_duration: u32) -> ScheduleRequest {
        ScheduleRequest {
            id: self.id.clone(),
            start_time: self.start_time.clone(),
            duration_minutes: Some(self.effective_duration(default_duration)),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Day {
            date,
            activities: Vec::new(),
        }
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn schedule_requests(&self, default_duration: u32) -> Vec<ScheduleRequest> {
        self.activities
            .iter()
            .map(|a| a.schedule_request(default_duration))
            .collect()
    }

    pub fn conflicts(&self) -> Vec<Conflict<'_>> {
        detect_conflicts(&self.activities)
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts().is_empty()
    }

    /// Free start times for an activity of `duration` minutes around the
    /// day's scheduled activities. Untimed activities don't block anything.
    pub fn suggest_slots(&self, duration: u32, options: &ScheduleOptions) -> Vec<ClockTime> {
        let bounds: Vec<(Option<&str>, Option<&str>)> = self
            .activities
            .iter()
            .map(|a| (a.start_time.as_deref(), a.end_time.as_deref()))
            .collect();
        suggest_slot_times(options, duration, &bounds)
    }

    /// Write assigned windows back onto matching activities.
    /// Returns how many activities were updated; unknown ids are skipped.
    pub fn apply_assignments(&mut self, assignments: &[Assignment]) -> usize {
        let mut updated = 0;
        for assignment in assignments {
            match self.activities.iter_mut().find(|a| a.id == assignment.id) {
                Some(activity) => {
                    activity.start_time = Some(assignment.start_time.clone());
                    activity.end_time = Some(assignment.end_time.clone());
                    updated += 1;
                }
                None => warn!(id = %assignment.id, date = %self.date, "assignment for unknown activity"),
            }
        }
        updated
    }

    /// Reschedule the whole day so nothing overlaps, then sort by start.
    pub fn auto_resolve(&mut self, options: &ScheduleOptions) -> Vec<Assignment> {
        let requests = self.schedule_requests(options.default_duration_minutes);
        let assignments = auto_schedule(&requests, options);
        self.apply_assignments(&assignments);
        self.sort_by_start();
        assignments
    }

    /// Order activities by start time; unscheduled ones go last, in their current order.
    pub fn sort_by_start(&mut self) {
        self.activities.sort_by_key(|a| (a.start().is_none(), a.start()));
    }

    pub fn total_cost(&self) -> f64 {
        self.activities.iter().filter_map(|a| a.cost).sum()
    }
}

impl Plan {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let days = start_date
            .iter_days()
            .take_while(|d| *d <= end_date)
            .map(Day::new)
            .collect();

        Plan {
            id: new_id(),
            name: name.into(),
            destination: None,
            start_date,
            end_date,
            timezone: None,
            days,
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut Day> {
        self.days.iter_mut().find(|d| d.date == date)
    }

    pub fn total_cost(&self) -> f64 {
        self.days.iter().map(Day::total_cost).sum()
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }

    pub fn tz(&self) -> TripdayResult<Option<chrono_tz::Tz>> {
        match self.timezone.as_deref() {
            None => Ok(None),
            Some(name) => name
                .parse::<chrono_tz::Tz>()
                .map(Some)
                .map_err(|_| TripdayError::InvalidPlan(format!("unknown timezone '{name}'"))),
        }
    }

    /// Structural checks that the planner UI normally enforces.
    pub fn validate(&self) -> TripdayResult<()> {
        if self.end_date < self.start_date {
            return Err(TripdayError::InvalidPlan(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        self.tz()?;

        let mut dates = HashSet::new();
        let mut ids = HashSet::new();
        for day in &self.days {
            if day.date < self.start_date || day.date > self.end_date {
                return Err(TripdayError::InvalidPlan(format!(
                    "day {} is outside the trip ({} to {})",
                    day.date, self.start_date, self.end_date
                )));
            }
            if !dates.insert(day.date) {
                return Err(TripdayError::InvalidPlan(format!("day {} appears twice", day.date)));
            }
            for activity in &day.activities {
                if !ids.insert(activity.id.as_str()) {
                    return Err(TripdayError::InvalidPlan(format!(
                        "activity id '{}' is used more than once",
                        activity.id
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_time;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn timed(id: &str, start: &str, end: &str) -> Activity {
        Activity {
            id: id.to_string(),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            ..Activity::new(id)
        }
    }

    #[test]
    fn new_plan_has_one_day_per_date() {
        let plan = Plan::new("Rome", date("2025-06-01"), date("2025-06-04"));
        assert_eq!(plan.days.len(), 4);
        assert_eq!(plan.days[3].date, date("2025-06-04"));
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn effective_duration_prefers_explicit_value() {
        let mut a = timed("a", "09:00", "10:30");
        assert_eq!(a.effective_duration(60), 90);
        a.duration_minutes = Some(0);
        assert_eq!(a.effective_duration(60), 0);
        a.duration_minutes = None;
        a.end_time = Some("08:00".into());
        assert_eq!(a.effective_duration(60), 60);
    }

    #[test]
    fn auto_resolve_removes_conflicts() {
        let mut day = Day::new(date("2025-06-01"));
        day.activities = vec![
            timed("museum", "09:00", "11:00"),
            timed("lunch", "10:30", "11:30"),
            Activity::new("walk"),
        ];
        assert!(day.has_conflicts());

        let assignments = day.auto_resolve(&ScheduleOptions::default());
        assert_eq!(assignments.len(), 3);
        assert!(!day.has_conflicts());

        let museum = day.activity("museum").unwrap();
        assert_eq!(museum.start_time.as_deref(), Some("09:00"));
        assert_eq!(museum.end_time.as_deref(), Some("11:00"));
        let lunch = day.activity("lunch").unwrap();
        assert_eq!(lunch.start_time.as_deref(), Some("11:15"));
        assert_eq!(lunch.end_time.as_deref(), Some("12:15"));
        assert_eq!(day.activities[0].id, "museum");
    }

    #[test]
    fn late_activities_still_conflict() {
        let mut day = Day::new(date("2025-06-01"));
        day.activities = vec![timed("party", "23:30", "25:00"), timed("fireworks", "23:40", "23:55")];
        let conflicts = day.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].overlap_minutes, 15);
        assert_eq!(day.activities[0].start(), parse_time("23:30"));
    }

    #[test]
    fn auto_resolve_past_midnight_stays_timed() {
        let mut day = Day::new(date("2025-06-01"));
        day.activities = vec![
            Activity { duration_minutes: Some(60), ..Activity::new("c") },
            Activity { duration_minutes: Some(840), ..Activity::new("a") },
            Activity { duration_minutes: Some(120), ..Activity::new("b") },
        ];
        day.auto_resolve(&ScheduleOptions::default());

        let windows: Vec<(&str, &str)> = day
            .activities
            .iter()
            .map(|a| (a.start_time.as_deref().unwrap(), a.end_time.as_deref().unwrap()))
            .collect();
        assert_eq!(windows, vec![("08:00", "22:00"), ("22:15", "24:15"), ("24:30", "25:30")]);
        assert!(day.activities.iter().all(|a| a.interval().is_some()));
        assert!(!day.has_conflicts());

        // A second pass reads the late times back and changes nothing.
        day.auto_resolve(&ScheduleOptions::default());
        assert_eq!(day.activities[2].start_time.as_deref(), Some("24:30"));
    }

    #[test]
    fn apply_assignments_skips_unknown_ids() {
        let mut day = Day::new(date("2025-06-01"));
        day.activities = vec![Activity { id: "a".into(), ..Activity::new("A") }];
        let assignments = vec![
            Assignment { id: "a".into(), start_time: "10:00".into(), end_time: "11:00".into() },
            Assignment { id: "ghost".into(), start_time: "12:00".into(), end_time: "13:00".into() },
        ];
        assert_eq!(day.apply_assignments(&assignments), 1);
        assert_eq!(day.activities[0].end_time.as_deref(), Some("11:00"));
    }

    #[test]
    fn day_slots_use_scheduled_activities_only() {
        let mut day = Day::new(date("2025-06-01"));
        day.activities = vec![timed("a", "09:00", "10:00"), Activity::new("loose")];
        let options = ScheduleOptions {
            day_end: parse_time("18:00").unwrap(),
            ..ScheduleOptions::default()
        };
        let slots: Vec<String> = day.suggest_slots(60, &options).into_iter().map(ClockTime::format).collect();
        assert_eq!(slots, vec!["08:00", "10:00"]);

        day.activities.push(timed("late", "10:30", "24:30"));
        assert_eq!(day.suggest_slots(60, &options), vec![parse_time("08:00").unwrap()]);
    }

    #[test]
    fn sort_by_start_puts_unscheduled_last() {
        let mut day = Day::new(date("2025-06-01"));
        day.activities = vec![Activity::new("x"), timed("b", "12:00", "13:00"), timed("a", "08:00", "09:00")];
        day.sort_by_start();
        let titles: Vec<&str> = day.activities.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "x"]);
    }

    #[test]
    fn costs_add_up() {
        let mut plan = Plan::new("Paris", date("2025-06-01"), date("2025-06-02"));
        plan.days[0].activities.push(Activity { cost: Some(12.5), ..Activity::new("Louvre") });
        plan.days[1].activities.push(Activity { cost: Some(30.0), ..Activity::new("Dinner") });
        plan.days[1].activities.push(Activity::new("Walk"));
        assert_eq!(plan.total_cost(), 42.5);
        assert_eq!(plan.activity_count(), 3);
    }

    #[test]
    fn validate_rejects_bad_plans() {
        let mut plan = Plan::new("Oslo", date("2025-06-01"), date("2025-06-02"));
        plan.timezone = Some("Mars/Olympus".into());
        assert!(matches!(plan.validate(), Err(TripdayError::InvalidPlan(_))));

        let mut plan = Plan::new("Oslo", date("2025-06-01"), date("2025-06-02"));
        plan.days.push(Day::new(date("2025-07-01")));
        assert!(plan.validate().is_err());

        let mut plan = Plan::new("Oslo", date("2025-06-01"), date("2025-06-02"));
        plan.days[0].activities.push(timed("dup", "09:00", "10:00"));
        plan.days[1].activities.push(timed("dup", "09:00", "10:00"));
        assert!(plan.validate().is_err());
    }

    #[test]
    fn deserializes_minimal_json() {
        let json = r#"{
            "id": "p1",
            "name": "Lisbon",
            "start_date": "2025-05-01",
            "end_date": "2025-05-02",
            "days": [{ "date": "2025-05-01", "activities": [
                { "title": "Tram 28", "start_time": "10:00", "category": "transport" }
            ]}]
        }"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        let activity = &plan.days[0].activities[0];
        assert_eq!(activity.category, Category::Transport);
        assert!(!activity.id.is_empty());
        assert_eq!(activity.end_time, None);
    }
}
