use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tripday_core::TripdayError;
use tripday_core::plan::{Activity, Category};
use tripday_core::schedule::ScheduleOptions;
use tripday_core::store::PlanFile;
use tripday_core::time::{parse_duration, parse_time};

use crate::render::Render;

pub struct NewActivity {
    pub title: String,
    pub start: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub category: Category,
    pub cost: Option<f64>,
}

pub fn run(mut file: PlanFile, date: NaiveDate, new: NewActivity, options: &ScheduleOptions) -> Result<()> {
    let duration = match new.duration {
        Some(ref d) => Some(
            parse_duration(d).ok_or_else(|| anyhow::anyhow!("Invalid duration '{}'", d))?,
        ),
        None => None,
    };

    let start = match new.start {
        Some(ref s) => Some(parse_time(s).ok_or_else(|| anyhow::anyhow!("Invalid start time '{}'. Expected HH:MM", s))?),
        None => None,
    };

    let mut activity = Activity::new(new.title);
    activity.location = new.location.filter(|l| !l.is_empty());
    activity.category = new.category;
    activity.cost = new.cost;
    activity.duration_minutes = duration;
    if let Some(start) = start {
        let end = start + duration.unwrap_or(options.default_duration_minutes);
        activity.start_time = Some(start.format());
        activity.end_time = Some(end.format());
    }

    tracing::debug!(title = %activity.title, start = ?activity.start_time, end = ?activity.end_time, %date, "adding activity");

    let slug = file.slug();
    let day = file.plan.day_mut(date).ok_or(TripdayError::DayNotFound(date))?;
    day.activities.push(activity);
    day.sort_by_start();

    let day = &*day;
    let conflicts = day.conflicts();
    println!("{} {}", "Added".green(), day.render());
    for activity in &day.activities {
        println!("  {}", activity.render());
    }
    for conflict in &conflicts {
        println!("  {}", conflict.render());
    }
    if !conflicts.is_empty() {
        println!(
            "{}",
            format!("Run `tripday schedule {} --day {} --write` to fix overlaps.", slug, date).dimmed()
        );
    }

    if !conflicts.is_empty() {
        tracing::info!(%date, conflicts = conflicts.len(), "added activity overlaps others");
    }

    file.save()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripday_core::plan::Plan;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn plan_file(dir: &tempfile::TempDir) -> PlanFile {
        let plan = Plan::new("Rome", date("2025-06-01"), date("2025-06-02"));
        let file = PlanFile::new(dir.path().join("rome.json"), plan);
        file.save().unwrap();
        file
    }

    fn new_activity(title: &str, start: Option<&str>, duration: Option<&str>) -> NewActivity {
        NewActivity {
            title: title.to_string(),
            start: start.map(String::from),
            duration: duration.map(String::from),
            location: Some(String::new()),
            category: Category::Food,
            cost: Some(18.0),
        }
    }

    #[test]
    fn end_is_start_plus_explicit_duration() {
        let dir = tempfile::tempdir().unwrap();
        let file = plan_file(&dir);
        let path = file.path.clone();

        let new = new_activity("Lunch", Some("12:30"), Some("1h 30m"));
        run(file, date("2025-06-02"), new, &ScheduleOptions::default()).unwrap();

        let saved = PlanFile::load(&path).unwrap();
        let lunch = &saved.plan.day(date("2025-06-02")).unwrap().activities[0];
        assert_eq!(lunch.title, "Lunch");
        assert_eq!(lunch.start_time.as_deref(), Some("12:30"));
        assert_eq!(lunch.end_time.as_deref(), Some("14:00"));
        assert_eq!(lunch.duration_minutes, Some(90));
        assert_eq!(lunch.location, None);
        assert_eq!(lunch.cost, Some(18.0));
    }

    #[test]
    fn end_falls_back_to_default_duration() {
        let dir = tempfile::tempdir().unwrap();
        let file = plan_file(&dir);
        let path = file.path.clone();
        let options = ScheduleOptions {
            default_duration_minutes: 45,
            ..ScheduleOptions::default()
        };

        run(file, date("2025-06-01"), new_activity("Coffee", Some("9:00"), None), &options).unwrap();

        let saved = PlanFile::load(&path).unwrap();
        let coffee = &saved.plan.days[0].activities[0];
        assert_eq!(coffee.start_time.as_deref(), Some("09:00"));
        assert_eq!(coffee.end_time.as_deref(), Some("09:45"));
        assert_eq!(coffee.duration_minutes, None);
    }

    #[test]
    fn late_activity_ends_past_midnight_and_still_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let file = plan_file(&dir);
        let path = file.path.clone();
        let options = ScheduleOptions::default();

        run(file, date("2025-06-01"), new_activity("Party", Some("23:30"), Some("90m")), &options).unwrap();
        let file = PlanFile::load(&path).unwrap();
        run(file, date("2025-06-01"), new_activity("Fireworks", Some("23:40"), Some("15")), &options).unwrap();

        let saved = PlanFile::load(&path).unwrap();
        let day = saved.plan.day(date("2025-06-01")).unwrap();
        assert_eq!(day.activities[0].end_time.as_deref(), Some("25:00"));
        assert_eq!(day.conflicts()[0].overlap_minutes, 15);
    }

    #[test]
    fn unknown_day_is_an_error_and_nothing_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let file = plan_file(&dir);
        let path = file.path.clone();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = run(file, date("2025-07-01"), new_activity("Lunch", None, None), &ScheduleOptions::default())
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<TripdayError>(), Some(TripdayError::DayNotFound(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn malformed_start_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = plan_file(&dir);
        let new = new_activity("Lunch", Some("24:30"), None);
        assert!(run(file, date("2025-06-01"), new, &ScheduleOptions::default()).is_err());
    }
}
