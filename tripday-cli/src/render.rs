//! Terminal rendering for tripday-core types.
//!
//! Extension traits that add colored output with owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tripday_core::conflict::Conflict;
use tripday_core::plan::{Activity, Day};
use tripday_core::schedule::Assignment;
use tripday_core::time::format_duration;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Activity {
    fn render(&self) -> String {
        let time = match (self.start_time.as_deref(), self.end_time.as_deref()) {
            (Some(start), Some(end)) => format!("{start}-{end}"),
            (Some(start), None) => format!("{start}      "),
            _ => "  --:--    ".to_string(),
        };

        let mut line = format!("{} {} {}", time, self.category.symbol(), self.title);
        if self.interval().is_some_and(|iv| !iv.end.is_same_day()) {
            line.push_str(&format!(" {}", "(+1d)".yellow()));
        }
        if let Some(ref location) = self.location {
            line.push_str(&format!(" {}", format!("@ {location}").dimmed()));
        }
        if let Some(cost) = self.cost {
            line.push_str(&format!(" {}", format!("({cost:.2})").dimmed()));
        }
        line
    }
}

impl Render for Conflict<'_> {
    fn render(&self) -> String {
        format!(
            "{} {} {} {} {}",
            "!".red(),
            self.activity1.title.red(),
            "overlaps".dimmed(),
            self.activity2.title.red(),
            format!("({})", format_duration(self.overlap_minutes)).dimmed()
        )
    }
}

impl Render for Assignment {
    fn render(&self) -> String {
        format!("{}-{}", self.start_time.green(), self.end_time.green())
    }
}

impl Render for Day {
    fn render(&self) -> String {
        format!("📅 {}", date_label(self.date))
    }
}

/// e.g. "Sun Jun 1"
pub fn date_label(date: NaiveDate) -> String {
    date.format("%a %b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(start: &str, end: &str) -> Activity {
        Activity {
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            ..Activity::new("Night tour")
        }
    }

    #[test]
    fn marks_activities_ending_after_midnight() {
        assert!(timed("23:30", "25:00").render().contains("(+1d)"));
        assert!(timed("24:30", "25:30").render().contains("(+1d)"));
        assert!(!timed("21:00", "23:59").render().contains("(+1d)"));
    }

    #[test]
    fn date_label_is_short() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(date_label(date), "Sun Jun 1");
    }
}
