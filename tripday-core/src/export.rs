//! Plan export: JSON and iCalendar.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use icalendar::{Calendar, Component, EventLike, Property};

use crate::constants::DEFAULT_DURATION_MINUTES;
use crate::error::TripdayResult;
use crate::plan::{Activity, Day, Plan};
use crate::time::{ClockTime, parse_stored_time};

/// Pretty JSON of the whole plan.
pub fn export_json(plan: &Plan) -> TripdayResult<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Generate one .ics calendar holding every timed activity in the plan.
///
/// Activities without a parseable start are left out. Times are floating
/// unless the plan names a timezone, in which case they carry a TZID.
pub fn generate_ics(plan: &Plan) -> TripdayResult<String> {
    let tz = plan.tz()?;
    let mut cal = Calendar::new();
    cal.name(&plan.name);
    if let Some(tz) = tz {
        cal.timezone(tz.name());
    }

    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let mut exported = 0;

    for day in &plan.days {
        for activity in &day.activities {
            let Some(start) = activity.start() else {
                tracing::debug!(id = %activity.id, date = %day.date, "skipping untimed activity");
                continue;
            };
            let end = activity_end(activity, start);

            let mut event = icalendar::Event::new();
            event.uid(&format!("{}@tripday", activity.id));
            event.summary(&activity.title);
            event.add_property("DTSTAMP", &dtstamp);

            add_datetime_property(&mut event, "DTSTART", at(day, start), plan.timezone.as_deref());
            add_datetime_property(&mut event, "DTEND", at(day, end), plan.timezone.as_deref());

            if let Some(ref location) = activity.location {
                event.location(location);
            }
            if let Some(ref notes) = activity.notes {
                event.description(notes);
            }
            event.add_property("CATEGORIES", activity.category.label().to_uppercase());

            cal.push(event.done());
            exported += 1;
        }
    }

    tracing::debug!(plan = %plan.name, exported, "generated ics");
    Ok(strip_ics_bloat(&cal.done().to_string()))
}

/// End of the exported event: the stored end when it is after the start,
/// otherwise start plus the activity's duration.
fn activity_end(activity: &Activity, start: ClockTime) -> ClockTime {
    match activity.end_time.as_deref().and_then(parse_stored_time) {
        Some(end) if end > start => end,
        _ => start + activity.effective_duration(DEFAULT_DURATION_MINUTES),
    }
}

/// Local date-time for a clock value on a given day; values past midnight
/// land on the following date.
fn at(day: &Day, time: ClockTime) -> NaiveDateTime {
    day.date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(time.minutes()))
}

fn add_datetime_property(
    event: &mut icalendar::Event,
    name: &str,
    datetime: NaiveDateTime,
    tzid: Option<&str>,
) {
    let mut prop = Property::new(name, datetime.format("%Y%m%dT%H%M%S").to_string());
    if let Some(tzid) = tzid {
        prop.add_parameter("TZID", tzid);
    }
    event.append_property(prop);
}

/// Tidy the icalendar crate's output: our own PRODID, no default CALSCALE.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:TRIPDAY\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Category;
    use chrono::NaiveDate;

    fn sample_plan() -> Plan {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let mut plan = Plan::new("Rome", start, end);
        plan.days[0].activities = vec![
            Activity {
                id: "colosseum".into(),
                start_time: Some("09:00".into()),
                end_time: Some("11:00".into()),
                location: Some("Piazza del Colosseo".into()),
                category: Category::Sightseeing,
                ..Activity::new("Colosseum")
            },
            Activity {
                id: "untimed".into(),
                ..Activity::new("Gelato somewhere")
            },
        ];
        plan.days[1].activities = vec![Activity {
            id: "late".into(),
            start_time: Some("23:30".into()),
            duration_minutes: Some(90),
            notes: Some("Night bus".into()),
            ..Activity::new("Night tour")
        }];
        plan
    }

    #[test]
    fn ics_contains_timed_activities_only() {
        let ics = generate_ics(&sample_plan()).unwrap();

        assert_eq!(ics.lines().filter(|l| *l == "BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("UID:colosseum@tripday"));
        assert!(ics.contains("DTSTART:20250601T090000"));
        assert!(ics.contains("DTEND:20250601T110000"));
        assert!(ics.contains("CATEGORIES:SIGHTSEEING"));
        assert!(!ics.contains("Gelato"));
    }

    #[test]
    fn ics_rolls_late_activities_into_next_day() {
        let ics = generate_ics(&sample_plan()).unwrap();
        assert!(ics.contains("DTSTART:20250602T233000"));
        assert!(ics.contains("DTEND:20250603T010000"));
    }

    #[test]
    fn ics_keeps_starts_written_past_midnight() {
        let mut plan = sample_plan();
        plan.days[0].activities.push(Activity {
            id: "club".into(),
            start_time: Some("24:30".into()),
            end_time: Some("26:00".into()),
            ..Activity::new("Club")
        });
        let ics = generate_ics(&plan).unwrap();
        assert_eq!(ics.lines().filter(|l| *l == "BEGIN:VEVENT").count(), 3);
        assert!(ics.contains("DTSTART:20250602T003000"));
        assert!(ics.contains("DTEND:20250602T020000"));
    }

    #[test]
    fn ics_exports_every_auto_resolved_activity() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut plan = Plan::new("Long day", start, start);
        plan.days[0].activities = [840, 120, 60]
            .into_iter()
            .map(|minutes| Activity { duration_minutes: Some(minutes), ..Activity::new(format!("{minutes}m")) })
            .collect();
        plan.days[0].auto_resolve(&crate::schedule::ScheduleOptions::default());

        let ics = generate_ics(&plan).unwrap();
        assert_eq!(ics.lines().filter(|l| *l == "BEGIN:VEVENT").count(), 3);
        assert!(ics.contains("DTSTART:20250602T003000"));
        assert!(ics.contains("DTEND:20250602T013000"));
    }

    #[test]
    fn ics_uses_tzid_when_plan_has_timezone() {
        let mut plan = sample_plan();
        plan.timezone = Some("Europe/Rome".into());
        let ics = generate_ics(&plan).unwrap();
        assert!(ics.contains("DTSTART;TZID=Europe/Rome:20250601T090000"));
    }

    #[test]
    fn ics_is_tidied() {
        let ics = generate_ics(&sample_plan()).unwrap();
        assert!(ics.contains("PRODID:TRIPDAY"));
        assert!(!ics.contains("CALSCALE:GREGORIAN"));
    }

    #[test]
    fn invalid_timezone_fails_export() {
        let mut plan = sample_plan();
        plan.timezone = Some("Nowhere/Else".into());
        assert!(generate_ics(&plan).is_err());
    }

    #[test]
    fn json_export_round_trips() {
        let plan = sample_plan();
        let json = export_json(&plan).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
