use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tripday_core::TripdayError;
use tripday_core::plan::Plan;
use tripday_core::schedule::ScheduleOptions;
use tripday_core::time::{format_duration, parse_duration};

use crate::render::Render;

pub fn run(plan: &Plan, date: NaiveDate, duration: &str, options: &ScheduleOptions) -> Result<()> {
    let minutes =
        parse_duration(duration).ok_or_else(|| anyhow::anyhow!("Invalid duration '{}'", duration))?;
    let day = plan.day(date).ok_or(TripdayError::DayNotFound(date))?;

    let slots = day.suggest_slots(minutes, options);

    println!(
        "{} {}",
        day.render(),
        format!(
            "free {} slots between {} and {}",
            format_duration(minutes),
            options.day_start,
            options.day_end
        )
        .dimmed()
    );

    if slots.is_empty() {
        println!("   {}", "No free slot fits".yellow());
        return Ok(());
    }

    for start in slots {
        println!("   {}-{}", start.green(), (start + minutes).green());
    }

    Ok(())
}
